//! Helpers for joining and rewriting asset URLs.
//!
//! Filtering external references and rewriting resolved URLs into template-relative paths
//! live in separate submodules so each rule can be tested on its own.

mod filters;
mod rewrite;

pub use filters::is_external_url;
pub use rewrite::{join_url, script_relative_path, style_relative_path};
