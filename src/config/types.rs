//! Core configuration types for SVG inlining
//!
//! This module contains the resolved `InlineSvgConfig` and the tagged input
//! shapes accepted for options that may be given in more than one form.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kuchiki::{ElementData, NodeDataRef, Selectors};

/// Maps a resolved SVG path to the id of its sprite-sheet symbol
pub type SpriteIdFn = Arc<dyn Fn(&Path) -> String + Send + Sync>;

/// Selectors option: a single selector string or a list of them
///
/// A single string may itself be a comma separated selector group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorSpec {
    Single(String),
    List(Vec<String>),
}

impl SelectorSpec {
    /// Join into one selector group, the union of all selectors
    #[must_use]
    pub fn to_group(&self) -> String {
        match self {
            Self::Single(selector) => selector.clone(),
            Self::List(selectors) => selectors.join(","),
        }
    }
}

impl From<&str> for SelectorSpec {
    fn from(selector: &str) -> Self {
        Self::Single(selector.to_string())
    }
}

impl From<String> for SelectorSpec {
    fn from(selector: String) -> Self {
        Self::Single(selector)
    }
}

impl From<Vec<String>> for SelectorSpec {
    fn from(selectors: Vec<String>) -> Self {
        Self::List(selectors)
    }
}

impl From<&[&str]> for SelectorSpec {
    fn from(selectors: &[&str]) -> Self {
        Self::List(selectors.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SelectorSpec {
    fn from(selectors: [&str; N]) -> Self {
        Self::List(selectors.iter().map(ToString::to_string).collect())
    }
}

/// Attrs option: a pattern source string or an already compiled regex
#[derive(Debug, Clone)]
pub enum AttrPattern {
    Source(String),
    Regex(fancy_regex::Regex),
}

impl From<&str> for AttrPattern {
    fn from(pattern: &str) -> Self {
        Self::Source(pattern.to_string())
    }
}

impl From<String> for AttrPattern {
    fn from(pattern: String) -> Self {
        Self::Source(pattern)
    }
}

impl From<fancy_regex::Regex> for AttrPattern {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Regex(regex)
    }
}

/// Compiled selector group used by the reference locator
#[derive(Clone)]
pub struct SelectorSet {
    pub(crate) source: String,
    pub(crate) compiled: Arc<Selectors>,
}

impl SelectorSet {
    /// The joined selector group this set was compiled from
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn matches(&self, element: &NodeDataRef<ElementData>) -> bool {
        self.compiled.matches(element)
    }
}

impl fmt::Debug for SelectorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectorSet").field(&self.source).finish()
    }
}

/// Compiled attribute retention predicate
#[derive(Debug, Clone)]
pub struct AttrFilter {
    pub(crate) regex: fancy_regex::Regex,
}

impl AttrFilter {
    /// Whether an attribute with this local name is copied onto the SVG root
    ///
    /// Unanchored search, like `RegExp.prototype.test`. A match that aborts
    /// (backtrack limit) counts as no match.
    #[must_use]
    pub fn retains(&self, name: &str) -> bool {
        match self.regex.is_match(name) {
            Ok(matched) => matched,
            Err(e) => {
                log::warn!("Attribute pattern failed on '{name}': {e}");
                false
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Resolved, immutable configuration for one or more transformations
///
/// Built only through [`InlineSvgConfig::builder`], so every value held here
/// has already been validated and normalised.
#[derive(Clone)]
pub struct InlineSvgConfig {
    pub(crate) selectors: SelectorSet,
    pub(crate) attrs: AttrFilter,

    /// Directory relative references are resolved against.
    ///
    /// **INVARIANT:** Always an absolute, existing path (normalised in builder).
    pub(crate) root: PathBuf,

    pub(crate) decode_entities: bool,
    pub(crate) create_spritesheet: bool,
    pub(crate) spritesheet_class: String,
    pub(crate) sprite_id_fn: Option<SpriteIdFn>,
}

impl fmt::Debug for InlineSvgConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineSvgConfig")
            .field("selectors", &self.selectors)
            .field("attrs", &self.attrs)
            .field("root", &self.root)
            .field("decode_entities", &self.decode_entities)
            .field("create_spritesheet", &self.create_spritesheet)
            .field("spritesheet_class", &self.spritesheet_class)
            .field("sprite_id_fn", &self.sprite_id_fn.as_ref().map(|_| "Fn(&Path) -> String"))
            .finish()
    }
}
