//! Builder for `InlineSvgConfig`
//!
//! The builder starts from the immutable defaults and every setter returns a
//! new builder value; nothing is merged in place. All validation happens in
//! [`InlineSvgConfigBuilder::build`], so an invalid option never results in a
//! partially applied configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kuchiki::Selectors;

use super::types::{AttrFilter, AttrPattern, InlineSvgConfig, SelectorSet, SelectorSpec, SpriteIdFn};
use crate::inline_svg::types::{InlineSvgError, InlineSvgResult};
use crate::utils::{
    DEFAULT_ATTRS_PATTERN, DEFAULT_SELECTORS, DEFAULT_SPRITESHEET_CLASS, absolutize,
};

/// Compile the selector option into one selector group
///
/// # Errors
///
/// Returns a configuration error naming `selectors` if the group is empty or
/// is not valid CSS selector syntax.
fn compile_selectors(spec: &SelectorSpec) -> InlineSvgResult<SelectorSet> {
    let group = spec.to_group();

    if group.trim().is_empty() {
        return Err(InlineSvgError::config(
            "selectors",
            "must contain at least one selector",
        ));
    }

    let compiled = Selectors::compile(&group).map_err(|()| {
        InlineSvgError::config("selectors", format!("'{group}' is not a valid selector"))
    })?;

    Ok(SelectorSet {
        source: group,
        compiled: Arc::new(compiled),
    })
}

/// Compile the attrs option into a retention predicate
fn compile_attrs(pattern: AttrPattern) -> InlineSvgResult<AttrFilter> {
    let regex = match pattern {
        AttrPattern::Regex(regex) => regex,
        AttrPattern::Source(source) => fancy_regex::Regex::new(&source).map_err(|e| {
            InlineSvgError::config("attrs", format!("'{source}' is not a valid pattern: {e}"))
        })?,
    };
    Ok(AttrFilter { regex })
}

/// Validate the root directory and make it absolute
fn resolve_root(root: Option<PathBuf>) -> InlineSvgResult<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().map_err(|e| {
            InlineSvgError::config("root", format!("could not determine working directory: {e}"))
        })?,
    };

    let absolute = absolutize(&root).map_err(|e| {
        InlineSvgError::config("root", format!("path {} could not be resolved: {e}", root.display()))
    })?;

    if !absolute.exists() {
        return Err(InlineSvgError::config(
            "root",
            format!("path {} does not exist", root.display()),
        ));
    }

    Ok(absolute)
}

fn validate_spritesheet_class(class: &str) -> InlineSvgResult<()> {
    if class.is_empty() {
        return Err(InlineSvgError::config("spritesheetClass", "must not be empty"));
    }
    if class.chars().any(char::is_whitespace) {
        return Err(InlineSvgError::config(
            "spritesheetClass",
            format!("'{class}' must be a single class name"),
        ));
    }
    Ok(())
}

/// Fluent builder for [`InlineSvgConfig`]
#[derive(Clone)]
pub struct InlineSvgConfigBuilder {
    pub(crate) selectors: SelectorSpec,
    pub(crate) attrs: AttrPattern,
    pub(crate) root: Option<PathBuf>,
    pub(crate) decode_entities: bool,
    pub(crate) create_spritesheet: bool,
    pub(crate) spritesheet_class: String,
    pub(crate) sprite_id_fn: Option<SpriteIdFn>,
}

impl Default for InlineSvgConfigBuilder {
    fn default() -> Self {
        Self {
            selectors: SelectorSpec::from(DEFAULT_SELECTORS),
            attrs: AttrPattern::from(DEFAULT_ATTRS_PATTERN),
            root: None,
            decode_entities: false,
            create_spritesheet: false,
            spritesheet_class: DEFAULT_SPRITESHEET_CLASS.to_string(),
            sprite_id_fn: None,
        }
    }
}

impl InlineSvgConfig {
    /// Create a builder seeded with the default options
    #[must_use]
    pub fn builder() -> InlineSvgConfigBuilder {
        InlineSvgConfigBuilder::default()
    }
}

impl InlineSvgConfigBuilder {
    /// Elements to inline, as one selector or a list of selectors
    #[must_use]
    pub fn selectors(mut self, selectors: impl Into<SelectorSpec>) -> Self {
        self.selectors = selectors.into();
        self
    }

    /// Pattern deciding which attributes of the referencing element are kept
    ///
    /// # Example
    /// ```rust
    /// # use kodegen_tools_inline_svg::config::InlineSvgConfig;
    /// # fn main() -> Result<(), kodegen_tools_inline_svg::InlineSvgError> {
    /// let config = InlineSvgConfig::builder()
    ///     .attrs("^(class|id)$") // keep only class and id
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn attrs(mut self, attrs: impl Into<AttrPattern>) -> Self {
        self.attrs = attrs.into();
        self
    }

    /// Directory that `src` references are resolved against
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    #[must_use]
    pub fn decode_entities(mut self, decode: bool) -> Self {
        self.decode_entities = decode;
        self
    }

    #[must_use]
    pub fn create_spritesheet(mut self, create: bool) -> Self {
        self.create_spritesheet = create;
        self
    }

    #[must_use]
    pub fn spritesheet_class(mut self, class: impl Into<String>) -> Self {
        self.spritesheet_class = class.into();
        self
    }

    /// Derive symbol ids from source paths instead of positional ids
    #[must_use]
    pub fn sprite_id_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path) -> String + Send + Sync + 'static,
    {
        self.sprite_id_fn = Some(Arc::new(f));
        self
    }

    /// Validate and normalise every option
    ///
    /// # Errors
    ///
    /// Returns [`InlineSvgError::Configuration`] naming the first invalid
    /// option. No filesystem access happens beyond checking `root`, and
    /// `root` is only checked once selectors and attrs are known to be valid.
    pub fn build(self) -> InlineSvgResult<InlineSvgConfig> {
        let selectors = compile_selectors(&self.selectors)?;
        let attrs = compile_attrs(self.attrs)?;
        validate_spritesheet_class(&self.spritesheet_class)?;
        let root = resolve_root(self.root)?;

        Ok(InlineSvgConfig {
            selectors,
            attrs,
            root,
            decode_entities: self.decode_entities,
            create_spritesheet: self.create_spritesheet,
            spritesheet_class: self.spritesheet_class,
            sprite_id_fn: self.sprite_id_fn,
        })
    }
}
