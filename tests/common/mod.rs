//! Test utilities and fixtures for the inline SVG test suite

use std::path::{Path, PathBuf};

use anyhow::Result;
use kodegen_tools_inline_svg::config::InlineSvgConfigBuilder;
use kodegen_tools_inline_svg::InlineSvgConfig;
use kuchiki::iter::NodeIterator;
use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef};
use tempfile::TempDir;

/// Simplified GitHub mark, the icon used throughout the suite
#[allow(dead_code)]
pub const GITHUB_SVG: &str = r#"<svg class="github-icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" width="16" height="16"><path d="M8 0C3.58 0 0 3.58 0 8c0 3.54 2.29 6.53 5.47 7.59.4.07.55-.17.55-.38 0-.19-.01-.82-.01-1.49C4 14.5 3.48 13.4 3.48 13.4z"/></svg>"#;

/// A temporary site root holding SVG fixtures
#[allow(dead_code)]
pub struct Fixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Fixture root with `github.svg` already in place
    pub fn with_github_icon() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write("github.svg", GITHUB_SVG)?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` at `relative`, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Builder rooted at this fixture
    pub fn config(&self) -> InlineSvgConfigBuilder {
        InlineSvgConfig::builder().root(self.root())
    }
}

/// Creates a test HTML document with specified content
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
</head>
<body>
    {}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

/// Parse output HTML for structural assertions
#[allow(dead_code)]
pub fn parse(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// All elements under `node` with the given (case-sensitive) local name
#[allow(dead_code)]
pub fn elements_named(node: &NodeRef, local: &str) -> Vec<NodeDataRef<ElementData>> {
    node.inclusive_descendants()
        .elements()
        .filter(|element| &*element.name.local == local)
        .collect()
}

/// Attribute value of an element, if present
#[allow(dead_code)]
pub fn attr(element: &NodeDataRef<ElementData>, name: &str) -> Option<String> {
    element.attributes.borrow().get(name).map(ToString::to_string)
}
