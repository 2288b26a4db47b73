//! Sprite registry: stable symbol ids per source file

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::SpriteIdFn;
use crate::utils::DEFAULT_SPRITE_ID_PREFIX;

/// Symbol assigned to one inlining site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteEntry {
    pub id: String,
    /// True the first time this source file is registered
    pub first_seen: bool,
}

/// Assigns symbol ids and owns every id used inside one sprite sheet
///
/// Built fresh for each document. Symbol ids and promoted definition ids
/// share one namespace, so neither can shadow the other.
pub struct SpriteRegistry {
    id_fn: Option<SpriteIdFn>,
    symbols: HashMap<PathBuf, String>,
    used_ids: HashSet<String>,
}

impl SpriteRegistry {
    #[must_use]
    pub fn new(id_fn: Option<SpriteIdFn>) -> Self {
        Self {
            id_fn,
            symbols: HashMap::new(),
            used_ids: HashSet::new(),
        }
    }

    /// Look up or assign the symbol id for `path`
    ///
    /// New files get `id_fn(path)` or the next positional id; a derived id
    /// that is already taken gets the first free `-N` suffix.
    pub fn register(&mut self, path: &Path) -> SpriteEntry {
        if let Some(id) = self.symbols.get(path) {
            return SpriteEntry {
                id: id.clone(),
                first_seen: false,
            };
        }

        let base = match &self.id_fn {
            Some(id_fn) => id_fn(path),
            None => format!("{DEFAULT_SPRITE_ID_PREFIX}{}", self.symbols.len()),
        };
        let id = self.claim_id(&base);

        if id != base {
            log::debug!("Symbol id '{base}' already taken, using '{id}' for {}", path.display());
        }

        self.symbols.insert(path.to_path_buf(), id.clone());
        SpriteEntry { id, first_seen: true }
    }

    /// Reserve `base`, or `base-1`, `base-2`, ... if it is taken
    pub fn claim_id(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 1;
        while self.used_ids.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.used_ids.insert(candidate.clone());
        candidate
    }

    /// Mark `id` as taken so neither symbols nor definitions can claim it
    pub fn reserve(&mut self, id: impl Into<String>) {
        self.used_ids.insert(id.into());
    }
}
