//! Resolve the script and style bundles and write the template fragment referencing them.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::asset_paths::{script_relative_path, style_relative_path};
use crate::bundle::{BundleResolver, Environment};
use crate::manifest::render_assignment;

/// Names and prefixes used when turning bundles into the template fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLayout {
  /// Prefix prepended to every resolved script URL.
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

impl Default for ManifestLayout {
  fn default() -> Self {
    Self {
      static_root: "_static".into(),
      scripts_bundle: "scripts".into(),
      styles_bundle: "styles".into(),
      scripts_variable: "script_files".into(),
      styles_variable: "css_files".into(),
    }
  }
}

/// Template-relative asset paths, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
  /// Script paths, each the static root followed by the resolved URL.
  pub scripts: Vec<String>,
  /// Stylesheet paths, each the resolved URL without its first character.
  pub styles: Vec<String>,
}

impl AssetManifest {
  /// Render the two-line template fragment: scripts first, then stylesheets.
  pub fn render(&self, layout: &ManifestLayout) -> String {
    let mut fragment = render_assignment(&layout.scripts_variable, &self.scripts);
    fragment.push_str(&render_assignment(&layout.styles_variable, &self.styles));
    fragment
  }
}

/// Resolves the script and style bundles of a layout into an [`AssetManifest`].
pub struct ManifestBuilder<'a, R: BundleResolver + ?Sized> {
  resolver: &'a R,
  layout: &'a ManifestLayout,
}

impl<'a, R: BundleResolver + ?Sized> ManifestBuilder<'a, R> {
  /// Create a builder resolving bundles through `resolver`.
  pub fn new(resolver: &'a R, layout: &'a ManifestLayout) -> Self {
    Self { resolver, layout }
  }

  /// Resolve both bundles, reporting each discovered asset to `progress`.
  ///
  /// Both bundles are resolved before anything is reported, so a missing bundle fails the
  /// run without partial output.
  pub fn build<W: Write + ?Sized>(&self, progress: &mut W) -> Result<AssetManifest> {
    let script_urls = self.resolve(&self.layout.scripts_bundle)?;
    let style_urls = self.resolve(&self.layout.styles_bundle)?;

    let mut manifest = AssetManifest::default();
    for url in &script_urls {
      writeln!(progress, " - {url}")?;
      manifest
        .scripts
        .push(script_relative_path(&self.layout.static_root, url));
    }
    for url in &style_urls {
      writeln!(progress, " - {url}")?;
      manifest.styles.push(style_relative_path(url));
    }

    Ok(manifest)
  }

  fn resolve(&self, bundle: &str) -> Result<Vec<String>> {
    let urls = self
      .resolver
      .urls(bundle)
      .with_context(|| format!("failed to resolve bundle `{bundle}`"))?;
    tracing::debug!(bundle, assets = urls.len(), "resolved bundle");
    Ok(urls)
  }
}

/// Load the bundle description at `config_path` and write the template fragment to
/// `output_path`, reporting progress on standard output.
pub fn run(config_path: &Path, output_path: &Path) -> Result<AssetManifest> {
  run_with_layout(config_path, output_path, &ManifestLayout::default())
}

/// Same as [`run`] with explicit bundle and variable names.
pub fn run_with_layout(
  config_path: &Path,
  output_path: &Path,
  layout: &ManifestLayout,
) -> Result<AssetManifest> {
  let environment = Environment::load(config_path)
    .with_context(|| format!("failed to load bundles from {}", config_path.display()))?;
  let stdout = io::stdout();
  let mut progress = stdout.lock();
  run_with(&environment, layout, output_path, &mut progress)
}

/// Resolve bundles through `resolver` and write the fragment, reporting to `progress`.
pub fn run_with<R, W>(
  resolver: &R,
  layout: &ManifestLayout,
  output_path: &Path,
  progress: &mut W,
) -> Result<AssetManifest>
where
  R: BundleResolver + ?Sized,
  W: Write + ?Sized,
{
  writeln!(progress, "Building assets..")?;

  let manifest = ManifestBuilder::new(resolver, layout).build(progress)?;

  if let Some(parent) = output_path.parent() {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  fs::write(output_path, manifest.render(layout))
    .with_context(|| format!("failed to write {}", output_path.display()))?;

  writeln!(progress, "done")?;
  Ok(manifest)
}
