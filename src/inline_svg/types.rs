//! Type definitions for SVG inlining

use std::path::PathBuf;

use kuchiki::{ElementData, NodeDataRef};
use thiserror::Error;

/// Result type alias for inlining operations
pub type InlineSvgResult<T> = Result<T, InlineSvgError>;

/// Error types for a document transformation
///
/// Every variant is terminal for the document being transformed: no
/// partially inlined output is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum InlineSvgError {
    /// An option has the wrong type or an unusable value
    #[error("Invalid option: {option} {message}")]
    Configuration {
        option: &'static str,
        message: String,
    },

    /// A matched element's `src` is missing, empty, or not a regular file
    #[error("Invalid source path: {reference}")]
    UnresolvedReference { reference: String, resolved: PathBuf },

    /// The referenced file exists but could not be read or used as SVG
    #[error("Failed to load SVG from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadFailure,
    },

    /// Writing the mutated tree back to markup failed
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),
}

impl InlineSvgError {
    pub(crate) fn config(option: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            option,
            message: message.into(),
        }
    }

    /// Name of the offending option, for configuration errors
    #[must_use]
    pub fn option(&self) -> Option<&'static str> {
        match self {
            Self::Configuration { option, .. } => Some(*option),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Underlying cause of an [`InlineSvgError::Load`]
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no <svg> root element found")]
    MissingSvgRoot,
}

/// A matched element together with the file it points at
///
/// Only lives for one Locator -> Loader -> Inliner step.
#[derive(Debug, Clone)]
pub struct Reference {
    pub element: NodeDataRef<ElementData>,
    pub raw: String,
    pub path: PathBuf,
}

/// An SVG root that has been spliced into the document
#[derive(Debug, Clone)]
pub struct InlinedSvg {
    /// Absolute path of the source file
    pub path: PathBuf,
    /// The `<svg>` element now owned by the document
    pub root: NodeDataRef<ElementData>,
}

/// Outcome of a transformation, with counters for logging and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub html: String,
    /// Number of referencing elements replaced
    pub inlined: usize,
    /// Number of `<symbol>` elements in the generated sprite sheet
    pub symbols: usize,
    /// Definitions moved into the shared `<defs>` block
    pub promoted_defs: usize,
    /// Definitions dropped because an equal one was already promoted
    pub deduplicated_defs: usize,
}

impl TransformReport {
    /// Whether the output differs from a plain pass-through
    #[must_use]
    pub fn was_modified(&self) -> bool {
        self.inlined > 0
    }
}
