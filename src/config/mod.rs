//! Configuration module for SVG inlining
//!
//! This module provides the `InlineSvgConfig` struct, its builder, and the
//! loosely typed `RawInlineOptions` form used when options come from JSON.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod raw;
pub mod types;

// Re-exports for public API
pub use builder::InlineSvgConfigBuilder;
pub use raw::RawInlineOptions;
pub use types::{AttrFilter, AttrPattern, InlineSvgConfig, SelectorSet, SelectorSpec, SpriteIdFn};
