#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod bundle;
pub mod config;
pub mod directive;
pub mod doctree;
pub mod document;
pub mod manifest;
pub mod models;

pub use bundle::{BundleError, BundleResolver, Environment};
pub use config::DocToolsConfig;
pub use directive::{Directive, DirectiveError, DirectiveRegistry, DirectiveTable};
pub use doctree::{DocTree, Node, NodeBuilder};
pub use manifest::{AssetManifest, ManifestBuilder, ManifestLayout};
