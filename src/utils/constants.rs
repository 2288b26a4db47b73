//! Default option values and fixed markup used by the inliner and the
//! sprite sheet builder

/// Default selectors: `<img>` and `<svg>` elements whose `src` ends in `.svg`
///
/// Both are matched as one selector group, so an element matching both
/// is still processed once, in document order.
pub const DEFAULT_SELECTORS: [&str; 2] = ["img[src$=\".svg\"]", "svg[src$=\".svg\"]"];

/// Default attribute retention pattern: everything except `src`
///
/// Needs lookahead, so attribute patterns compile with `fancy-regex`. Also
/// drops any attribute whose name merely starts with `src` (e.g. `srcset`).
pub const DEFAULT_ATTRS_PATTERN: &str = "^(?!src).*$";

/// Attribute on the referencing element that names the SVG file
pub const SOURCE_ATTR: &str = "src";

/// CSS class applied to the generated sprite container
pub const DEFAULT_SPRITESHEET_CLASS: &str = "svg-sprite-sheet";

/// Prefix for positional symbol ids (`svg-sprite-0`, `svg-sprite-1`, ...)
pub const DEFAULT_SPRITE_ID_PREFIX: &str = "svg-sprite-";

/// Inline style keeping the sprite container out of layout
///
/// Must not be `display: none`: gradients defined inside an undisplayed
/// subtree are not painted by several browsers.
pub const SPRITESHEET_STYLE: &str = "position:absolute;width:0;height:0;overflow:hidden";

/// Root attributes copied onto the generated `<symbol>`
pub const SYMBOL_ATTRS: [&str; 4] = ["viewBox", "preserveAspectRatio", "width", "height"];
