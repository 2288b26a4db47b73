//! Pipeline entry points
//!
//! One call transforms one document start to finish: parse, then for every
//! matched element locate -> load -> inline, then the optional sprite sheet
//! pass, then serialize. The tree is private to the call, so a failure at any
//! step simply drops it and nothing partially inlined escapes.

use kuchiki::traits::TendrilSink;

use super::inliner::inline_reference;
use super::locator::{find_matches, resolve_reference};
use super::serializer::serialize_document;
use super::types::{InlineSvgResult, TransformReport};
use crate::config::InlineSvgConfig;
use crate::spritesheet::build_spritesheet;

/// Inline every referenced SVG in `html`
///
/// Returns the transformed document, or `html` unchanged (byte for byte)
/// when no element matches the configured selectors.
///
/// # Errors
///
/// Fails with the first unresolved reference, load failure, or serializer
/// error; see [`super::InlineSvgError`].
///
/// # Example
/// ```rust,no_run
/// # use kodegen_tools_inline_svg::{InlineSvgConfig, transform};
/// # fn main() -> Result<(), kodegen_tools_inline_svg::InlineSvgError> {
/// let config = InlineSvgConfig::builder().root("./public").build()?;
/// let html = transform(r#"<img src="/icons/logo.svg" class="logo">"#, &config)?;
/// # Ok(())
/// # }
/// ```
pub fn transform(html: &str, config: &InlineSvgConfig) -> InlineSvgResult<String> {
    transform_with_report(html, config).map(|report| report.html)
}

/// Like [`transform`], also reporting what was changed
///
/// # Errors
///
/// See [`transform`].
pub fn transform_with_report(html: &str, config: &InlineSvgConfig) -> InlineSvgResult<TransformReport> {
    let document = kuchiki::parse_html().one(html);

    let matches = find_matches(&document, config);
    if matches.is_empty() {
        log::debug!("No elements match '{}', passing document through", config.selectors().as_str());
        return Ok(TransformReport {
            html: html.to_string(),
            ..TransformReport::default()
        });
    }

    let mut inlined = Vec::with_capacity(matches.len());
    for element in matches {
        let reference = resolve_reference(element, config)?;
        inlined.push(inline_reference(reference, config.attrs())?);
    }

    let mut report = TransformReport {
        inlined: inlined.len(),
        ..TransformReport::default()
    };

    if config.create_spritesheet() {
        let stats = build_spritesheet(&document, inlined, config);
        report.symbols = stats.symbols;
        report.promoted_defs = stats.promoted_defs;
        report.deduplicated_defs = stats.deduplicated_defs;
    }

    report.html = serialize_document(&document, config.decode_entities())?;

    log::info!(
        "Inlined {} SVG reference(s): {} symbol(s), {} shared definition(s), {} duplicate(s) removed",
        report.inlined,
        report.symbols,
        report.promoted_defs,
        report.deduplicated_defs
    );

    Ok(report)
}
