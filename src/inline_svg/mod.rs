//! SVG inlining functionality
//!
//! This module replaces elements that reference external SVG files with the
//! parsed content of those files, producing a self-contained document.

// Sub-modules
pub mod inliner;
pub mod loader;
pub mod locator;
pub mod orchestrator;
pub mod serializer;
pub mod types;

// Re-exports for public API
pub use orchestrator::{transform, transform_with_report};
pub use types::{InlineSvgError, InlineSvgResult, InlinedSvg, LoadFailure, Reference, TransformReport};
