//! Resolving bundles into URLs and building their outputs.

use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::asset_paths::{is_external_url, join_url};
use crate::bundle::{BundleError, Environment};
use crate::models::{BundleOptionsRecord, BundleRecord, ContentRecord};

/// Placeholder in an output name replaced by the content version.
const VERSION_PLACEHOLDER: &str = "%(version)s";

/// A written bundle output.
struct BuiltOutput {
  /// Output name relative to the environment directory, placeholder substituted.
  output: String,
  /// Short content hash of the written file.
  version: String,
}

/// Uniform view over top-level and nested bundle declarations.
#[derive(Clone, Copy)]
struct BundleView<'a> {
  contents: &'a [ContentRecord],
  output: Option<&'a str>,
  filters: &'a [String],
  debug: Option<bool>,
}

impl<'a> From<&'a BundleRecord> for BundleView<'a> {
  fn from(record: &'a BundleRecord) -> Self {
    Self {
      contents: record.contents(),
      output: record.output(),
      filters: record.filters(),
      debug: record.debug(),
    }
  }
}

impl<'a> From<&'a BundleOptionsRecord> for BundleView<'a> {
  fn from(options: &'a BundleOptionsRecord) -> Self {
    Self {
      contents: options.contents.as_slice(),
      output: options.output.as_deref(),
      filters: options
        .filters
        .as_ref()
        .map_or(&[][..], |filters| filters.as_slice()),
      debug: options.debug,
    }
  }
}

impl Environment {
  pub(super) fn resolve_bundle(
    &self,
    name: &str,
    record: &BundleRecord,
  ) -> Result<Vec<String>, BundleError> {
    self.resolve_view(name, BundleView::from(record), self.debug)
  }

  fn resolve_view(
    &self,
    name: &str,
    bundle: BundleView<'_>,
    inherited_debug: bool,
  ) -> Result<Vec<String>, BundleError> {
    let debug = bundle.debug.unwrap_or(inherited_debug);
    if debug {
      return self.source_urls(name, bundle, debug);
    }

    match bundle.output {
      Some(output) => {
        let built = self.build_output(name, bundle, output)?;
        let mut url = join_url(&self.url, &built.output);
        if self.expires(output) {
          url.push('?');
          url.push_str(&built.version);
        }
        tracing::debug!(bundle = name, %url, "resolved built bundle");
        Ok(vec![url])
      }
      None => {
        let is_container = bundle
          .contents
          .iter()
          .all(|content| matches!(content, ContentRecord::Nested(_)));
        if !is_container {
          return Err(BundleError::MissingOutput {
            name: name.to_string(),
          });
        }
        self.source_urls(name, bundle, debug)
      }
    }
  }

  /// Whether built URLs for `output` carry a `?<version>` query string.
  fn expires(&self, output: &str) -> bool {
    self
      .url_expire
      .unwrap_or_else(|| !output.contains(VERSION_PLACEHOLDER))
  }

  /// URLs for each content entry in turn; nested bundles resolve on their own terms.
  fn source_urls(
    &self,
    name: &str,
    bundle: BundleView<'_>,
    debug: bool,
  ) -> Result<Vec<String>, BundleError> {
    let mut urls = Vec::new();
    for content in bundle.contents {
      match content {
        ContentRecord::Path(path) if is_external_url(path) => urls.push(path.clone()),
        ContentRecord::Path(path) => urls.push(join_url(&self.url, path)),
        ContentRecord::Nested(nested) => {
          urls.extend(self.resolve_view(name, BundleView::from(nested.as_ref()), debug)?);
        }
      }
    }
    Ok(urls)
  }

  /// Concatenate every source of `bundle` into `output` under the environment directory.
  fn build_output(
    &self,
    name: &str,
    bundle: BundleView<'_>,
    output: &str,
  ) -> Result<BuiltOutput, BundleError> {
    if !bundle.filters.is_empty() {
      tracing::warn!(
        bundle = name,
        filters = ?bundle.filters,
        "bundle filters are not applied; sources are concatenated as-is"
      );
    }

    let mut sources = Vec::new();
    collect_sources(name, bundle, &mut sources)?;

    let mut parts = Vec::with_capacity(sources.len());
    for source in &sources {
      let path = self.directory.join(source);
      let text = fs::read_to_string(&path).map_err(|source| BundleError::Source {
        path: path.clone(),
        source,
      })?;
      parts.push(text);
    }

    let content = parts.join("\n");
    let version = content_version(content.as_bytes());
    let output = output.replace(VERSION_PLACEHOLDER, &version);

    let destination = self.directory.join(&output);
    if let Some(parent) = destination.parent() {
      fs::create_dir_all(parent).map_err(|source| BundleError::Source {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    fs::write(&destination, &content).map_err(|source| BundleError::Source {
      path: destination.clone(),
      source,
    })?;

    tracing::debug!(
      bundle = name,
      sources = sources.len(),
      output = %destination.display(),
      "built bundle output"
    );
    Ok(BuiltOutput { output, version })
  }
}

/// First eight hex digits of the SHA-256 of `data`.
fn content_version(data: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(data);
  let hash = format!("{:x}", hasher.finalize());
  hash[..8].to_string()
}

fn collect_sources(
  name: &str,
  bundle: BundleView<'_>,
  sources: &mut Vec<PathBuf>,
) -> Result<(), BundleError> {
  for content in bundle.contents {
    match content {
      ContentRecord::Path(path) if is_external_url(path) => {
        return Err(BundleError::ExternalSource {
          name: name.to_string(),
          url: path.clone(),
        });
      }
      ContentRecord::Path(path) => sources.push(PathBuf::from(path.trim_start_matches('/'))),
      ContentRecord::Nested(nested) => {
        collect_sources(name, BundleView::from(nested.as_ref()), sources)?;
      }
    }
  }
  Ok(())
}
