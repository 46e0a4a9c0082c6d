//! Loading the bundle description from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::{BundleError, BundleResolver};
use crate::models::{BundleRecord, EnvironmentRecord};

/// A loaded bundle description bound to the directory its sources live in.
#[derive(Debug, Clone)]
pub struct Environment {
  pub(super) directory: PathBuf,
  pub(super) url: String,
  pub(super) debug: bool,
  pub(super) url_expire: Option<bool>,
  pub(super) record: EnvironmentRecord,
}

impl Environment {
  /// Load a YAML bundle description.
  ///
  /// A relative `directory` is resolved against the directory holding the description file,
  /// which is also the default when `directory` is absent.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, BundleError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| BundleError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let record: EnvironmentRecord =
      serde_yaml::from_str(&contents).map_err(|source| BundleError::Parse {
        path: path.to_path_buf(),
        source,
      })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(Self::from_record(base, record))
  }

  /// Bind an already parsed description to `base`.
  pub fn from_record(base: &Path, record: EnvironmentRecord) -> Self {
    let directory = match record.directory.as_deref() {
      Some(directory) => base.join(directory),
      None => base.to_path_buf(),
    };
    tracing::debug!(
      directory = %directory.display(),
      bundles = record.bundles.len(),
      "loaded asset environment"
    );

    Self {
      directory,
      url: record.url.clone(),
      debug: record.debug,
      url_expire: record.url_expire,
      record,
    }
  }

  /// Directory holding bundle sources and outputs.
  pub fn directory(&self) -> &Path {
    &self.directory
  }

  /// URL prefix under which [`Environment::directory`] is served.
  pub fn url(&self) -> &str {
    &self.url
  }

  /// Look up a bundle by name.
  pub fn bundle(&self, name: &str) -> Result<&BundleRecord, BundleError> {
    self
      .record
      .bundles
      .get(name)
      .ok_or_else(|| BundleError::MissingBundle {
        name: name.to_string(),
      })
  }

  /// Names of the declared bundles, sorted.
  pub fn bundle_names(&self) -> impl Iterator<Item = &str> + '_ {
    self.record.bundles.keys().map(String::as_str)
  }
}

impl BundleResolver for Environment {
  fn urls(&self, bundle: &str) -> Result<Vec<String>, BundleError> {
    let record = self.bundle(bundle)?;
    self.resolve_bundle(bundle, record)
  }
}
