//! Shared definition handling for the sprite sheet
//!
//! Definitions (gradients, patterns, clip paths, ...) living in a symbol's
//! `<defs>` are moved into one shared block. Structurally equal definitions
//! from different symbols collapse into a single copy, and every reference
//! inside the symbol is rewritten to the id that survives.

use std::collections::{HashMap, HashSet};

use kuchiki::iter::NodeIterator;
use kuchiki::{ElementData, ExpandedName, NodeData, NodeDataRef, NodeRef};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::registry::SpriteRegistry;

lazy_static! {
    // Hardcoded and syntactically valid; failure here is a compile-time bug.
    static ref URL_REFERENCE: Regex = Regex::new(r#"url\(\s*(['"]?)#([^'")\s]+)(['"]?)\s*\)"#)
        .expect("BUG: hardcoded url(#id) pattern is invalid - this is a compile-time bug");
}

/// Canonical text form of a definition subtree, used as its equality key
///
/// Covers namespaces, tag names, attributes (in the tree's sorted order),
/// element children and non-whitespace text. The definition's own `id` is
/// left out: it names the definition, it is not part of what it draws.
/// References are kept as written; see [`SharedDefs::absorb_symbol`] for
/// keys that follow references to sibling definitions.
#[must_use]
pub fn canonical_key(definition: &NodeRef) -> String {
    let mut key = String::new();
    write_canonical(definition, &mut key, true, None);
    key
}

/// Sibling definitions of one symbol, with their keys memoised by id
///
/// A reference to a sibling is keyed by what the sibling draws, not by its
/// id, so two definitions are equal only if everything they reach is equal.
struct KeyContext {
    definitions: HashMap<String, NodeRef>,
    keys: HashMap<String, String>,
    visiting: HashSet<String>,
}

impl KeyContext {
    fn new(definitions: &[NodeDataRef<ElementData>]) -> Self {
        let mut by_id = HashMap::new();
        for definition in definitions {
            if let Some(id) = definition.attributes.borrow().get("id") {
                by_id
                    .entry(id.to_string())
                    .or_insert_with(|| definition.as_node().clone());
            }
        }
        Self {
            definitions: by_id,
            keys: HashMap::new(),
            visiting: HashSet::new(),
        }
    }

    /// Key of sibling `id`; `None` when `id` is not a sibling definition
    fn key_of(&mut self, id: &str) -> Option<String> {
        if let Some(key) = self.keys.get(id) {
            return Some(key.clone());
        }
        let node = self.definitions.get(id)?.clone();
        if !self.visiting.insert(id.to_string()) {
            return Some("<cycle>".to_string());
        }

        let mut key = String::new();
        write_canonical(&node, &mut key, true, Some(self));
        self.visiting.remove(id);
        self.keys.insert(id.to_string(), key.clone());
        Some(key)
    }

    /// Key of `node`, which carries `id`
    ///
    /// A second definition repeating an id is not addressable by it, so it
    /// is keyed on its own instead of through the memo.
    fn key_for(&mut self, id: &str, node: &NodeRef) -> String {
        if self.definitions.get(id) == Some(node) {
            if let Some(key) = self.key_of(id) {
                return key;
            }
        }
        let mut key = String::new();
        write_canonical(node, &mut key, true, Some(self));
        key
    }

    fn resolve_urls(&mut self, value: &str) -> String {
        if !value.contains("url(") {
            return value.to_string();
        }
        URL_REFERENCE
            .replace_all(value, |caps: &Captures| match self.key_of(&caps[2]) {
                Some(key) => format!("url(ref({key}))"),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    fn resolve_value(&mut self, name: &ExpandedName, value: &str) -> String {
        if &*name.local == "href" {
            if let Some(key) = value.strip_prefix('#').and_then(|id| self.key_of(id)) {
                return format!("ref({key})");
            }
        }
        self.resolve_urls(value)
    }
}

fn write_canonical(node: &NodeRef, out: &mut String, is_root: bool, mut context: Option<&mut KeyContext>) {
    match node.data() {
        NodeData::Element(element) => {
            out.push('<');
            out.push_str(&element.name.ns);
            out.push('|');
            out.push_str(&element.name.local);
            for (name, attribute) in &element.attributes.borrow().map {
                if is_root && name.ns.is_empty() && &*name.local == "id" {
                    continue;
                }
                let value = match context.as_deref_mut() {
                    Some(context) => context.resolve_value(name, &attribute.value),
                    None => attribute.value.clone(),
                };
                out.push_str(&format!(" {}|{}={value:?}", &*name.ns, &*name.local));
            }
            out.push('>');
            for child in node.children() {
                write_canonical(&child, out, false, context.as_deref_mut());
            }
            out.push_str("</>");
        }
        NodeData::Text(text) => {
            let text = text.borrow();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                let trimmed = match context {
                    Some(context) => context.resolve_urls(trimmed),
                    None => trimmed.to_string(),
                };
                out.push_str(&format!("{trimmed:?}"));
            }
        }
        _ => {}
    }
}

/// Rewrite `url(#id)` occurrences in `value`; `None` when nothing changed
fn rewrite_url_references(value: &str, renames: &HashMap<String, String>) -> Option<String> {
    if !value.contains("url(") {
        return None;
    }

    let mut changed = false;
    let rewritten = URL_REFERENCE.replace_all(value, |caps: &Captures| match renames.get(&caps[2]) {
        Some(new_id) => {
            changed = true;
            format!("url({}#{new_id}{})", &caps[1], &caps[3])
        }
        None => caps[0].to_string(),
    });

    changed.then(|| rewritten.into_owned())
}

/// Point every reference to a renamed id at its new id
///
/// Handles `href`/`xlink:href="#id"`, `url(#id)` in any attribute, and
/// `url(#id)` inside `<style>` text.
pub fn rewrite_references(root: &NodeRef, renames: &HashMap<String, String>) {
    if renames.is_empty() {
        return;
    }

    for element in root.inclusive_descendants().elements() {
        {
            let mut attrs = element.attributes.borrow_mut();
            for (name, attribute) in &mut attrs.map {
                if &*name.local == "href" {
                    let replacement = attribute
                        .value
                        .strip_prefix('#')
                        .and_then(|id| renames.get(id))
                        .map(|new_id| format!("#{new_id}"));
                    if let Some(replacement) = replacement {
                        attribute.value = replacement;
                        continue;
                    }
                }
                if let Some(rewritten) = rewrite_url_references(&attribute.value, renames) {
                    attribute.value = rewritten;
                }
            }
        }

        if &*element.name.local == "style" {
            for text in element.as_node().children().text_nodes() {
                let mut contents = text.borrow_mut();
                if let Some(rewritten) = rewrite_url_references(&contents, renames) {
                    *contents = rewritten;
                }
            }
        }
    }
}

/// Element children of every `<defs>` in `symbol` that carry an `id`
fn collect_definitions(symbol: &NodeRef) -> Vec<NodeDataRef<ElementData>> {
    symbol
        .descendants()
        .elements()
        .filter(|element| &*element.name.local == "defs")
        .flat_map(|defs| defs.as_node().children().elements().collect::<Vec<_>>())
        .filter(|definition| definition.attributes.borrow().get("id").is_some())
        .collect()
}

/// Detach `<defs>` elements left without element or text content
fn remove_empty_defs(symbol: &NodeRef) {
    let empty: Vec<_> = symbol
        .descendants()
        .elements()
        .filter(|element| &*element.name.local == "defs")
        .filter(|defs| {
            let node = defs.as_node();
            node.children().elements().next().is_none() && node.text_contents().trim().is_empty()
        })
        .collect();

    for defs in empty {
        defs.as_node().detach();
    }
}

/// The shared `<defs>` block being assembled for one sprite sheet
#[derive(Default)]
pub struct SharedDefs {
    by_key: HashMap<String, String>,
    promoted: Vec<NodeRef>,
    deduplicated: usize,
}

impl SharedDefs {
    /// Move `symbol`'s definitions into the shared block
    ///
    /// Every definition's fate (kept, renamed or dropped as a duplicate) is
    /// decided before any reference is touched. The references in the
    /// symbol and in its promoted definitions are then rewritten once, from
    /// their original values, against the complete set of renames.
    pub fn absorb_symbol(&mut self, symbol: &NodeRef, registry: &mut SpriteRegistry) {
        let definitions = collect_definitions(symbol);
        let mut context = KeyContext::new(&definitions);
        let mut renames: HashMap<String, String> = HashMap::new();
        let mut absorbed = Vec::new();

        for definition in definitions {
            let Some(id) = definition.attributes.borrow().get("id").map(ToString::to_string) else {
                continue;
            };
            let node = definition.as_node();
            let key = context.key_for(&id, node);
            node.detach();

            if let Some(shared_id) = self.by_key.get(&key) {
                if *shared_id != id {
                    renames.insert(id.clone(), shared_id.clone());
                }
                self.deduplicated += 1;
                log::debug!("Dropped duplicate definition '{id}', using shared '{shared_id}'");
                continue;
            }

            let shared_id = registry.claim_id(&id);
            if shared_id != id {
                definition
                    .attributes
                    .borrow_mut()
                    .insert("id", shared_id.clone());
                renames.insert(id.clone(), shared_id.clone());
            }

            log::debug!("Promoted definition '{id}' to shared defs as '{shared_id}'");
            self.by_key.insert(key, shared_id);
            absorbed.push(node.clone());
        }

        for node in &absorbed {
            rewrite_references(node, &renames);
        }
        rewrite_references(symbol, &renames);
        self.promoted.extend(absorbed);
        remove_empty_defs(symbol);
    }

    /// Promoted definitions, in first-seen order
    #[must_use]
    pub fn into_promoted(self) -> Vec<NodeRef> {
        self.promoted
    }

    #[must_use]
    pub fn promoted_count(&self) -> usize {
        self.promoted.len()
    }

    #[must_use]
    pub fn deduplicated_count(&self) -> usize {
        self.deduplicated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    fn first(document: &NodeRef, selector: &str) -> NodeRef {
        document.select_first(selector).unwrap().as_node().clone()
    }

    #[test]
    fn test_key_ignores_own_id_and_whitespace() {
        let document = kuchiki::parse_html().one(
            r##"<svg><defs>
<linearGradient id="a"><stop offset="0" stop-color="#fff"/></linearGradient>
<linearGradient id="b">
    <stop offset="0" stop-color="#fff"/>
</linearGradient>
</defs></svg>"##,
        );
        let a = first(&document, "#a");
        let b = first(&document, "#b");

        assert_eq!(canonical_key(&a), canonical_key(&b));
    }

    #[test]
    fn test_key_sees_nested_attribute_values() {
        let document = kuchiki::parse_html().one(
            r##"<svg><defs>
<linearGradient id="a"><stop offset="0" stop-color="#fff"/></linearGradient>
<linearGradient id="b"><stop offset="0" stop-color="#000"/></linearGradient>
</defs></svg>"##,
        );

        assert_ne!(
            canonical_key(&first(&document, "#a")),
            canonical_key(&first(&document, "#b"))
        );
    }

    #[test]
    fn test_rewrite_references_in_attributes_and_style() {
        let document = kuchiki::parse_html().one(
            r##"<svg>
<style>.x { fill: url(#old); }</style>
<rect fill="url(#old)" stroke="url('#keep')"/>
<use href="#old"/>
<path style="fill: url( '#old' )"/>
</svg>"##,
        );
        let svg = first(&document, "svg");
        let renames = HashMap::from([("old".to_string(), "new".to_string())]);

        rewrite_references(&svg, &renames);

        let rect = document.select_first("rect").unwrap();
        assert_eq!(rect.attributes.borrow().get("fill"), Some("url(#new)"));
        assert_eq!(rect.attributes.borrow().get("stroke"), Some("url('#keep')"));
        let use_element = document.select_first("use").unwrap();
        assert_eq!(use_element.attributes.borrow().get("href"), Some("#new"));
        assert!(first(&document, "style").text_contents().contains("url(#new)"));
        let path = document.select_first("path").unwrap();
        assert_eq!(path.attributes.borrow().get("style"), Some("fill: url('#new')"));
    }

    #[test]
    fn test_absorb_dedupes_across_symbols() {
        let document = kuchiki::parse_html().one(
            r##"<svg>
<symbol id="one"><defs><linearGradient id="g"><stop stop-color="red"/></linearGradient></defs><rect fill="url(#g)"/></symbol>
<symbol id="two"><defs><linearGradient id="other"><stop stop-color="red"/></linearGradient></defs><rect fill="url(#other)"/></symbol>
</svg>"##,
        );
        let mut registry = SpriteRegistry::new(None);
        let mut shared = SharedDefs::default();

        shared.absorb_symbol(&first(&document, "#one"), &mut registry);
        shared.absorb_symbol(&first(&document, "#two"), &mut registry);

        assert_eq!(shared.promoted_count(), 1);
        assert_eq!(shared.deduplicated_count(), 1);
        assert!(document.select_first("symbol defs").is_err());
        let fills: Vec<String> = document
            .select("rect")
            .unwrap()
            .filter_map(|rect| rect.attributes.borrow().get("fill").map(ToString::to_string))
            .collect();
        assert_eq!(fills, vec!["url(#g)", "url(#g)"]);
    }

    #[test]
    fn test_absorb_renames_unequal_definitions_sharing_an_id() {
        let document = kuchiki::parse_html().one(
            r##"<svg>
<symbol id="one"><defs><linearGradient id="g"><stop stop-color="red"/></linearGradient></defs><rect fill="url(#g)"/></symbol>
<symbol id="two"><defs><linearGradient id="g"><stop stop-color="blue"/></linearGradient></defs><rect fill="url(#g)"/></symbol>
</svg>"##,
        );
        let mut registry = SpriteRegistry::new(None);
        let mut shared = SharedDefs::default();

        shared.absorb_symbol(&first(&document, "#one"), &mut registry);
        shared.absorb_symbol(&first(&document, "#two"), &mut registry);

        assert_eq!(shared.promoted_count(), 2);
        let promoted = shared.into_promoted();
        let ids: Vec<String> = promoted
            .iter()
            .filter_map(|node| node.as_element().and_then(|e| e.attributes.borrow().get("id").map(ToString::to_string)))
            .collect();
        assert_eq!(ids, vec!["g", "g-1"]);

        let second_rect = document.select("#two rect").unwrap().next().unwrap();
        assert_eq!(second_rect.attributes.borrow().get("fill"), Some("url(#g-1)"));
    }

    #[test]
    fn test_sibling_references_are_keyed_by_target() {
        let document = kuchiki::parse_html().one(
            r##"<svg>
<symbol id="one"><defs><pattern id="p"><rect fill="url(#g)"/></pattern><linearGradient id="g"><stop stop-color="red"/></linearGradient></defs></symbol>
<symbol id="two"><defs><pattern id="p"><rect fill="url(#g)"/></pattern><linearGradient id="g"><stop stop-color="blue"/></linearGradient></defs></symbol>
</svg>"##,
        );
        let one = collect_definitions(&first(&document, "#one"));
        let two = collect_definitions(&first(&document, "#two"));

        assert_eq!(canonical_key(one[0].as_node()), canonical_key(two[0].as_node()));
        let mut one_context = KeyContext::new(&one);
        let mut two_context = KeyContext::new(&two);
        assert_ne!(one_context.key_of("p"), two_context.key_of("p"));
    }

    #[test]
    fn test_absorb_rewrites_each_reference_once() {
        let document = kuchiki::parse_html().one(
            r##"<svg>
<symbol id="one"><defs><linearGradient id="y"><stop stop-color="red"/></linearGradient></defs></symbol>
<symbol id="two"><defs>
<linearGradient id="x"><stop stop-color="red"/></linearGradient>
<linearGradient id="y"><stop stop-color="blue"/></linearGradient>
<pattern id="p"><rect fill="url(#x)"/></pattern>
</defs><circle fill="url(#y)"/></symbol>
</svg>"##,
        );
        let mut registry = SpriteRegistry::new(None);
        let mut shared = SharedDefs::default();

        shared.absorb_symbol(&first(&document, "#one"), &mut registry);
        shared.absorb_symbol(&first(&document, "#two"), &mut registry);

        assert_eq!(shared.deduplicated_count(), 1);
        let promoted = shared.into_promoted();
        let pattern_rect = promoted[2].select_first("rect").unwrap();
        assert_eq!(pattern_rect.attributes.borrow().get("fill"), Some("url(#y)"));
        let circle = document.select_first("circle").unwrap();
        assert_eq!(circle.attributes.borrow().get("fill"), Some("url(#y-1)"));
    }
}
