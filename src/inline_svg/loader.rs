//! SVG loader: reads a referenced file into a detached tree fragment

use std::path::Path;

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef};

use super::types::{InlineSvgError, InlineSvgResult, LoadFailure};

/// Read and parse the SVG file at `path`, returning its detached root
///
/// The file goes through the same HTML5 tree builder as the host document,
/// so foreign-content rules (case-adjusted `viewBox`, self-closing tags)
/// match what the document itself would produce. Anything outside the first
/// `<svg>` element (XML declaration, doctype, comments) is dropped.
///
/// Every call parses afresh: two sites referencing the same file never share
/// nodes, so per-site attribute merges cannot leak between them.
///
/// # Errors
///
/// Returns [`InlineSvgError::Load`] if the file cannot be read as UTF-8 text
/// or contains no `<svg>` element.
pub fn load_svg(path: &Path) -> InlineSvgResult<NodeDataRef<ElementData>> {
    let content = std::fs::read_to_string(path).map_err(|e| InlineSvgError::Load {
        path: path.to_path_buf(),
        source: LoadFailure::Io(e),
    })?;

    let fragment = kuchiki::parse_html().one(content);
    let root = fragment
        .select_first("svg")
        .map_err(|()| InlineSvgError::Load {
            path: path.to_path_buf(),
            source: LoadFailure::MissingSvgRoot,
        })?;

    root.as_node().detach();
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_prolog_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        std::fs::write(
            &path,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><path d="M0 0h16v16H0z"/></svg>"#,
        )
        .unwrap();

        let root = load_svg(&path).unwrap();
        assert_eq!(&*root.name.local, "svg");
        assert_eq!(root.attributes.borrow().get("viewBox"), Some("0 0 16 16"));
        assert!(root.as_node().parent().is_none());
    }

    #[test]
    fn test_file_without_svg_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-really.svg");
        std::fs::write(&path, "<p>hello</p>").unwrap();

        let err = load_svg(&path).unwrap_err();
        assert!(matches!(
            err,
            InlineSvgError::Load {
                source: LoadFailure::MissingSvgRoot,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.svg");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x3c]).unwrap();

        let err = load_svg(&path).unwrap_err();
        assert!(matches!(
            err,
            InlineSvgError::Load {
                source: LoadFailure::Io(_),
                ..
            }
        ));
        assert!(err.to_string().contains("binary.svg"));
    }

    #[test]
    fn test_each_load_is_a_fresh_tree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        std::fs::write(&path, r#"<svg class="icon"></svg>"#).unwrap();

        let first = load_svg(&path).unwrap();
        let second = load_svg(&path).unwrap();
        first.attributes.borrow_mut().insert("class", "changed".to_string());

        assert_eq!(second.attributes.borrow().get("class"), Some("icon"));
    }
}
