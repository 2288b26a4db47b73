pub mod constants;
pub mod path_utils;

pub use constants::*;
pub use path_utils::{absolutize, normalize_path, resolve_under_root};
