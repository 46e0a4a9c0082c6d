//! Serde records describing the YAML bundle description.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level bundle description document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentRecord {
  /// Directory holding source files and build outputs, relative to the description file.
  #[serde(default)]
  pub directory: Option<String>,
  /// URL prefix under which `directory` is served.
  #[serde(default)]
  pub url: String,
  /// Serve source files individually instead of building outputs.
  #[serde(default)]
  pub debug: bool,
  /// Append `?<version>` to built output URLs. When unset, the version is appended unless
  /// the output name already carries a `%(version)s` placeholder.
  #[serde(default)]
  pub url_expire: Option<bool>,
  /// Named bundles.
  #[serde(default)]
  pub bundles: BTreeMap<String, BundleRecord>,
}

/// A named bundle, written either as a bare list of sources or as a mapping with options.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BundleRecord {
  /// Bare list of contents, no output and no options.
  Sources(Vec<ContentRecord>),
  /// Bundle with explicit options.
  Detailed(BundleOptionsRecord),
}

/// Bundle written as a mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleOptionsRecord {
  /// Sources and nested bundles, in load order.
  #[serde(default)]
  pub contents: OneOrMany<ContentRecord>,
  /// Output file relative to the environment directory.
  #[serde(default)]
  pub output: Option<String>,
  /// Filter names declared for the bundle.
  #[serde(default)]
  pub filters: Option<OneOrMany<String>>,
  /// Per-bundle override of the environment debug flag.
  #[serde(default)]
  pub debug: Option<bool>,
}

/// A single entry of a bundle's contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentRecord {
  /// Source file path or absolute URL.
  Path(String),
  /// Nested bundle.
  Nested(Box<BundleOptionsRecord>),
}

/// YAML value accepted either as a single item or a sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
  /// Sequence of items.
  Many(Vec<T>),
  /// Single item.
  One(T),
}

impl<T> Default for OneOrMany<T> {
  fn default() -> Self {
    Self::Many(Vec::new())
  }
}

impl<T> OneOrMany<T> {
  /// Borrow the items as a slice, preserving declaration order.
  pub fn as_slice(&self) -> &[T] {
    match self {
      Self::One(item) => std::slice::from_ref(item),
      Self::Many(items) => items,
    }
  }
}

impl BundleRecord {
  /// Borrow the bundle contents in declaration order.
  pub fn contents(&self) -> &[ContentRecord] {
    match self {
      Self::Sources(items) => items,
      Self::Detailed(options) => options.contents.as_slice(),
    }
  }

  /// Output file, when the bundle declares one.
  pub fn output(&self) -> Option<&str> {
    match self {
      Self::Sources(_) => None,
      Self::Detailed(options) => options.output.as_deref(),
    }
  }

  /// Declared filter names.
  pub fn filters(&self) -> &[String] {
    match self {
      Self::Sources(_) => &[],
      Self::Detailed(options) => options.filters.as_ref().map_or(&[][..], OneOrMany::as_slice),
    }
  }

  /// Per-bundle debug override.
  pub fn debug(&self) -> Option<bool> {
    match self {
      Self::Sources(_) => None,
      Self::Detailed(options) => options.debug,
    }
  }
}
