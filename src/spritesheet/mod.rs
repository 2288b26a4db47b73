//! Sprite sheet generation
//!
//! Optional second stage after inlining: consolidates every inlined SVG into
//! one container of `<symbol>` elements with a shared, deduplicated `<defs>`
//! block, referenced from each original site through `<use>`.

// Sub-modules
pub mod builder;
pub mod defs;
pub mod registry;

// Re-exports for public API
pub use builder::{SpritesheetStats, build_spritesheet};
pub use defs::{SharedDefs, canonical_key, rewrite_references};
pub use registry::{SpriteEntry, SpriteRegistry};
