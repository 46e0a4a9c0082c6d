//! Tool configuration loader describing where bundle descriptions and generated fragments live.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::manifest::ManifestLayout;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "doctools.config.json";

/// Discoverable configuration describing the documentation source layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocToolsConfig {
  /// YAML bundle description consumed by the asset environment.
  pub assets_config: String,
  /// Template fragment written by the asset manifest builder.
  pub assets_output: String,
  /// Prefix prepended to resolved script URLs.
  pub static_root: String,
  /// Bundle holding the site scripts.
  pub scripts_bundle: String,
  /// Bundle holding the site stylesheets.
  pub styles_bundle: String,
  /// Template variable bound to the script list.
  pub scripts_variable: String,
  /// Template variable bound to the stylesheet list.
  pub styles_variable: String,
}

impl Default for DocToolsConfig {
  fn default() -> Self {
    Self {
      assets_config: "source/_static/assets.yml".into(),
      assets_output: "source/_static/assets/assets.html".into(),
      static_root: "_static".into(),
      scripts_bundle: "scripts".into(),
      styles_bundle: "styles".into(),
      scripts_variable: "script_files".into(),
      styles_variable: "css_files".into(),
    }
  }
}

impl DocToolsConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing file yields the defaults. An unreadable or malformed file also yields the
  /// defaults, with a warning so the operator notices the ignored settings.
  pub fn discover(root: &Path) -> Self {
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      return Self::default();
    }

    Self::from_path(&candidate).unwrap_or_else(|| {
      tracing::warn!(path = %candidate.display(), "ignoring unreadable tool configuration");
      Self::default()
    })
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    Self::load(path).ok()
  }

  /// Read configuration from a file the operator named explicitly, keeping the failure cause.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
  }

  /// Path to the bundle description relative to `root`.
  pub fn assets_config_path(&self, root: &Path) -> PathBuf {
    root.join(&self.assets_config)
  }

  /// Path to the generated template fragment relative to `root`.
  pub fn assets_output_path(&self, root: &Path) -> PathBuf {
    root.join(&self.assets_output)
  }

  /// Borrowing conversion into the manifest layout, cloning the underlying strings.
  pub fn to_layout(&self) -> ManifestLayout {
    ManifestLayout {
      static_root: self.static_root.clone(),
      scripts_bundle: self.scripts_bundle.clone(),
      styles_bundle: self.styles_bundle.clone(),
      scripts_variable: self.scripts_variable.clone(),
      styles_variable: self.styles_variable.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_defaults_when_file_is_missing() {
    let dir = tempdir().unwrap();
    let config = DocToolsConfig::discover(dir.path());
    assert_eq!(config.assets_config, "source/_static/assets.yml");
    assert_eq!(config.static_root, "_static");
  }

  #[test]
  fn partial_files_keep_remaining_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r#"{"static_root": "static", "styles_variable": "stylesheets"}"#,
    )
    .unwrap();

    let config = DocToolsConfig::discover(dir.path());
    assert_eq!(config.static_root, "static");
    assert_eq!(config.styles_variable, "stylesheets");
    assert_eq!(config.scripts_variable, "script_files");

    let layout = config.to_layout();
    assert_eq!(layout.static_root, "static");
    assert_eq!(layout.scripts_bundle, "scripts");
  }

  #[test]
  fn malformed_files_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();

    assert!(DocToolsConfig::from_path(&dir.path().join(DEFAULT_CONFIG_FILE)).is_none());
    let config = DocToolsConfig::discover(dir.path());
    assert_eq!(config.assets_output, "source/_static/assets/assets.html");
  }

  #[test]
  fn load_keeps_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tools.json");
    fs::write(&path, r#"{"static_root": 42}"#).unwrap();

    let err = DocToolsConfig::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("failed to parse"));
    assert!(err.root_cause().to_string().contains("invalid type"));
  }

  #[test]
  fn load_reports_missing_files() {
    let dir = tempdir().unwrap();
    let err = DocToolsConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
  }

  #[test]
  fn resolves_paths_against_root() {
    let config = DocToolsConfig::default();
    let root = Path::new("/docs");
    assert_eq!(
      config.assets_config_path(root),
      PathBuf::from("/docs/source/_static/assets.yml")
    );
    assert_eq!(
      config.assets_output_path(root),
      PathBuf::from("/docs/source/_static/assets/assets.html")
    );
  }
}
