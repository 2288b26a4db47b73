//! Sprite sheet assembly
//!
//! Turns every inlined SVG into a `<symbol>` inside one hidden container and
//! leaves a thin `<svg><use href="#id"/></svg>` at each original site.

use kuchiki::iter::NodeIterator;
use kuchiki::{Attribute, ElementData, ExpandedName, NodeDataRef, NodeRef};

use super::defs::SharedDefs;
use super::registry::SpriteRegistry;
use crate::config::InlineSvgConfig;
use crate::inline_svg::InlinedSvg;
use crate::utils::{SPRITESHEET_STYLE, SYMBOL_ATTRS};

/// Counters describing the generated sprite sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpritesheetStats {
    pub symbols: usize,
    pub promoted_defs: usize,
    pub deduplicated_defs: usize,
}

fn attribute(local: &str, value: impl Into<String>) -> (ExpandedName, Attribute) {
    (
        ExpandedName::new("", local),
        Attribute {
            prefix: None,
            value: value.into(),
        },
    )
}

/// New element in the same namespace as `template` (the SVG namespace)
fn svg_element(
    template: &ElementData,
    local: &str,
    attributes: Vec<(ExpandedName, Attribute)>,
) -> NodeRef {
    let mut name = template.name.clone();
    name.prefix = None;
    name.local = local.into();
    NodeRef::new_element(name, attributes)
}

/// Build the `<symbol>` for `root`, moving its children into it
fn make_symbol(root: &NodeDataRef<ElementData>, id: &str) -> NodeRef {
    let mut attributes = vec![attribute("id", id)];
    attributes.extend(
        root.attributes
            .borrow()
            .map
            .iter()
            .filter(|(name, _)| name.ns.is_empty() && SYMBOL_ATTRS.contains(&&*name.local))
            .map(|(name, value)| (name.clone(), value.clone())),
    );

    let symbol = svg_element(root, "symbol", attributes);
    let children: Vec<_> = root.as_node().children().collect();
    for child in children {
        symbol.append(child);
    }
    symbol
}

/// Empty `root` in place and point it at symbol `id`
///
/// The root keeps its merged attributes, so per-site classes, sizes and ids
/// survive on the reference element.
fn make_site_reference(root: &NodeDataRef<ElementData>, id: &str) {
    let node = root.as_node();
    let children: Vec<_> = node.children().collect();
    for child in children {
        child.detach();
    }
    node.append(svg_element(root, "use", vec![attribute("href", format!("#{id}"))]));
}

/// Ids in the document outside the inlined SVG content
///
/// Site roots count (they keep their ids at the site); their children do
/// not, since those move into symbols and the shared defs.
fn document_ids(document: &NodeRef, inlined: &[InlinedSvg]) -> Vec<String> {
    let roots: Vec<NodeRef> = inlined.iter().map(|site| site.root.as_node().clone()).collect();
    document
        .inclusive_descendants()
        .elements()
        .filter(|element| !element.as_node().ancestors().any(|ancestor| roots.contains(&ancestor)))
        .filter_map(|element| element.attributes.borrow().get("id").map(ToString::to_string))
        .collect()
}

/// Replace every inlined SVG with a symbol reference and append the sheet
///
/// Symbols appear in first-seen order; a file inlined at several sites
/// becomes one symbol referenced from each of them. Does nothing when
/// `inlined` is empty.
pub fn build_spritesheet(
    document: &NodeRef,
    inlined: Vec<InlinedSvg>,
    config: &InlineSvgConfig,
) -> SpritesheetStats {
    let Some(template) = inlined.first().map(|site| site.root.clone()) else {
        return SpritesheetStats::default();
    };

    let mut registry = SpriteRegistry::new(config.sprite_id_fn().cloned());
    for id in document_ids(document, &inlined) {
        registry.reserve(id);
    }
    let mut symbols = Vec::new();

    for site in &inlined {
        let entry = registry.register(&site.path);
        if entry.first_seen {
            symbols.push(make_symbol(&site.root, &entry.id));
            log::debug!("Created symbol '{}' for {}", entry.id, site.path.display());
        }
        make_site_reference(&site.root, &entry.id);
    }

    let mut shared = SharedDefs::default();
    for symbol in &symbols {
        shared.absorb_symbol(symbol, &mut registry);
    }

    let stats = SpritesheetStats {
        symbols: symbols.len(),
        promoted_defs: shared.promoted_count(),
        deduplicated_defs: shared.deduplicated_count(),
    };

    let container = svg_element(
        &template,
        "svg",
        vec![
            attribute("class", config.spritesheet_class()),
            attribute("aria-hidden", "true"),
            attribute("style", SPRITESHEET_STYLE),
        ],
    );

    let promoted = shared.into_promoted();
    if !promoted.is_empty() {
        let defs = svg_element(&template, "defs", Vec::new());
        for definition in promoted {
            defs.append(definition);
        }
        container.append(defs);
    }
    for symbol in symbols {
        container.append(symbol);
    }

    match document.select_first("body") {
        Ok(body) => body.as_node().append(container),
        Err(()) => document.append(container),
    }

    stats
}
