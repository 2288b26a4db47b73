//! Loosely typed options, as supplied by JSON configuration files
//!
//! Each option is kept as a raw `serde_json::Value` and checked for the
//! expected shape when it is applied, so a wrong type is reported against the
//! option that carries it rather than as a generic parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::builder::InlineSvgConfigBuilder;
use super::types::{InlineSvgConfig, SelectorSpec};
use crate::inline_svg::types::{InlineSvgError, InlineSvgResult};

/// Caller supplied overrides; absent (or `null`) keys keep their defaults
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInlineOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode_entities: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_spritesheet: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spritesheet_class: Option<Value>,
}

fn expect_bool(option: &'static str, value: &Value) -> InlineSvgResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| InlineSvgError::config(option, "must be a boolean"))
}

fn expect_string(option: &'static str, value: &Value) -> InlineSvgResult<String> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| InlineSvgError::config(option, "must be a string"))
}

fn selector_spec(value: &Value) -> InlineSvgResult<SelectorSpec> {
    match value {
        Value::String(selector) => Ok(SelectorSpec::Single(selector.clone())),
        Value::Array(entries) => {
            let selectors: Vec<String> = entries
                .iter()
                .filter_map(|entry| {
                    let selector = entry.as_str();
                    if selector.is_none() {
                        log::warn!("Ignoring non-string selector entry: {entry}");
                    }
                    selector.map(ToString::to_string)
                })
                .collect();
            Ok(SelectorSpec::List(selectors))
        }
        _ => Err(InlineSvgError::config(
            "selectors",
            "must be either string or Array",
        )),
    }
}

impl RawInlineOptions {
    /// Parse options from JSON text
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is not a JSON object.
    pub fn from_json(json: &str) -> InlineSvgResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| InlineSvgError::config("options", format!("could not be parsed: {e}")))
    }

    /// Layer these options over `builder`, type checking each one
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first option whose value
    /// has the wrong type. Options are checked in a fixed order:
    /// `decodeEntities`, `root`, `attrs`, `selectors`, `createSpritesheet`,
    /// `spritesheetClass`.
    pub fn apply(
        &self,
        mut builder: InlineSvgConfigBuilder,
    ) -> InlineSvgResult<InlineSvgConfigBuilder> {
        if let Some(value) = &self.decode_entities {
            builder = builder.decode_entities(expect_bool("decodeEntities", value)?);
        }

        if let Some(value) = &self.root {
            builder = builder.root(expect_string("root", value)?);
        }

        if let Some(value) = &self.attrs {
            let pattern = value.as_str().ok_or_else(|| {
                InlineSvgError::config("attrs", "must be either RegExp or string")
            })?;
            builder = builder.attrs(pattern);
        }

        if let Some(value) = &self.selectors {
            builder = builder.selectors(selector_spec(value)?);
        }

        if let Some(value) = &self.create_spritesheet {
            builder = builder.create_spritesheet(expect_bool("createSpritesheet", value)?);
        }

        if let Some(value) = &self.spritesheet_class {
            builder = builder.spritesheet_class(expect_string("spritesheetClass", value)?);
        }

        Ok(builder)
    }

    /// Resolve these options over the defaults
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a mistyped or invalid option.
    pub fn resolve(&self) -> InlineSvgResult<InlineSvgConfig> {
        self.apply(InlineSvgConfig::builder())?.build()
    }
}
