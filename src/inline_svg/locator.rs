//! Reference locator: finds inlineable elements and resolves their files

use kuchiki::iter::NodeIterator;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use super::types::{InlineSvgError, InlineSvgResult, Reference};
use crate::config::InlineSvgConfig;
use crate::utils::{SOURCE_ATTR, resolve_under_root};

/// Collect every element matching the configured selector group
///
/// Elements come back in document order and each appears once, even when it
/// matches several selectors of the group. The list is collected up front
/// because inlining detaches nodes, which would invalidate a live iterator.
#[must_use]
pub fn find_matches(document: &NodeRef, config: &InlineSvgConfig) -> Vec<NodeDataRef<ElementData>> {
    let selectors = config.selectors();
    document
        .inclusive_descendants()
        .elements()
        .filter(|element| selectors.matches(element))
        .collect()
}

/// Resolve a matched element's `src` to an existing file under `root`
///
/// # Errors
///
/// Returns [`InlineSvgError::UnresolvedReference`] when `src` is missing,
/// empty, or does not point at a regular file.
pub fn resolve_reference(
    element: NodeDataRef<ElementData>,
    config: &InlineSvgConfig,
) -> InlineSvgResult<Reference> {
    let raw = element
        .attributes
        .borrow()
        .get(SOURCE_ATTR)
        .map(ToString::to_string)
        .unwrap_or_default();

    let path = resolve_under_root(config.root(), &raw);

    if raw.is_empty() || !path.is_file() {
        log::debug!("Unresolved SVG reference '{raw}' (resolved to {})", path.display());
        return Err(InlineSvgError::UnresolvedReference {
            reference: raw,
            resolved: path,
        });
    }

    Ok(Reference { element, raw, path })
}
