pub mod config;
pub mod inline_svg;
pub mod spritesheet;
pub mod utils;

pub use config::{AttrPattern, InlineSvgConfig, InlineSvgConfigBuilder, RawInlineOptions, SelectorSpec};
pub use inline_svg::{
    InlineSvgError, InlineSvgResult, LoadFailure, TransformReport, transform, transform_with_report,
};
pub use spritesheet::SpritesheetStats;
