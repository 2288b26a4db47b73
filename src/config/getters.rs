//! Getter methods for `InlineSvgConfig`

use std::path::Path;

use super::types::{AttrFilter, InlineSvgConfig, SelectorSet, SpriteIdFn};

impl InlineSvgConfig {
    #[must_use]
    pub fn selectors(&self) -> &SelectorSet {
        &self.selectors
    }

    #[must_use]
    pub fn attrs(&self) -> &AttrFilter {
        &self.attrs
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn decode_entities(&self) -> bool {
        self.decode_entities
    }

    #[must_use]
    pub fn create_spritesheet(&self) -> bool {
        self.create_spritesheet
    }

    #[must_use]
    pub fn spritesheet_class(&self) -> &str {
        &self.spritesheet_class
    }

    #[must_use]
    pub fn sprite_id_fn(&self) -> Option<&SpriteIdFn> {
        self.sprite_id_fn.as_ref()
    }
}
