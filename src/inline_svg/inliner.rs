//! Inliner: merges attributes and splices loaded SVG roots into the document

use kuchiki::{ElementData, NodeDataRef};

use super::loader::load_svg;
use super::types::{InlineSvgResult, InlinedSvg, Reference};
use crate::config::AttrFilter;

/// Copy the retained attributes of `source` onto `target`
///
/// Same-named attributes already on `target` are overwritten. Returns the
/// number of attributes copied.
pub fn merge_attributes(
    source: &NodeDataRef<ElementData>,
    target: &NodeDataRef<ElementData>,
    filter: &AttrFilter,
) -> usize {
    let retained: Vec<_> = source
        .attributes
        .borrow()
        .map
        .iter()
        .filter(|(name, _)| filter.retains(&name.local))
        .map(|(name, attribute)| (name.clone(), attribute.clone()))
        .collect();

    let count = retained.len();
    let mut target_attrs = target.attributes.borrow_mut();
    for (name, attribute) in retained {
        target_attrs.map.insert(name, attribute);
    }
    count
}

/// Replace `reference.element` with the SVG it points at
///
/// The SVG root takes exactly the position the referencing element held;
/// the referencing element is detached afterwards.
///
/// # Errors
///
/// Propagates [`super::InlineSvgError::Load`] from the loader. On error the
/// document is left untouched by this call.
pub fn inline_reference(reference: Reference, filter: &AttrFilter) -> InlineSvgResult<InlinedSvg> {
    let root = load_svg(&reference.path)?;

    let copied = merge_attributes(&reference.element, &root, filter);

    let node = reference.element.as_node();
    node.insert_before(root.as_node().clone());
    node.detach();

    log::debug!(
        "Replaced <{}> with inline SVG: {} (resolved to {}, {copied} attributes retained)",
        &*reference.element.name.local,
        reference.raw,
        reference.path.display()
    );

    Ok(InlinedSvg {
        path: reference.path,
        root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    fn filter(pattern: &str) -> AttrFilter {
        AttrFilter {
            regex: fancy_regex::Regex::new(pattern).unwrap(),
        }
    }

    #[test]
    fn test_merge_overwrites_existing_attribute() {
        let document = kuchiki::parse_html()
            .one(r#"<img src="a.svg" class="from-img" alt="x"><svg class="from-file" width="16"></svg>"#);
        let img = document.select_first("img").unwrap();
        let svg = document.select_first("svg").unwrap();

        let copied = merge_attributes(&img, &svg, &filter(crate::utils::DEFAULT_ATTRS_PATTERN));

        let attrs = svg.attributes.borrow();
        assert_eq!(copied, 2);
        assert_eq!(attrs.get("class"), Some("from-img"));
        assert_eq!(attrs.get("alt"), Some("x"));
        assert_eq!(attrs.get("width"), Some("16"));
        assert_eq!(attrs.get("src"), None);
    }

    #[test]
    fn test_merge_with_match_all_keeps_src() {
        let document = kuchiki::parse_html().one(r#"<img src="a.svg"><svg></svg>"#);
        let img = document.select_first("img").unwrap();
        let svg = document.select_first("svg").unwrap();

        merge_attributes(&img, &svg, &filter(".*"));

        assert_eq!(svg.attributes.borrow().get("src"), Some("a.svg"));
    }
}
