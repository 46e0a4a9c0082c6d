//! Errors raised while loading or resolving bundles.

use std::path::PathBuf;

/// Errors that can occur while loading the bundle description or resolving bundles.
#[derive(Debug)]
pub enum BundleError {
  /// Failed to read the bundle description from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the YAML bundle description.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
  /// The requested bundle is not declared in the description.
  MissingBundle {
    /// Name that was looked up.
    name: String,
  },
  /// A bundle with local sources must declare an output when not in debug mode.
  MissingOutput {
    /// Bundle that lacks an output.
    name: String,
  },
  /// External URLs can be served in debug mode but not concatenated into an output.
  ExternalSource {
    /// Bundle declaring the source.
    name: String,
    /// Offending URL.
    url: String,
  },
  /// Failed to read a source file or write a built output.
  Source {
    /// File that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
}

impl std::fmt::Display for BundleError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::MissingBundle { name } => write!(f, "no bundle named `{name}` is declared"),
      Self::MissingOutput { name } => {
        write!(f, "bundle `{name}` has local sources but no output file")
      }
      Self::ExternalSource { name, url } => {
        write!(f, "bundle `{name}` cannot build external source {url}")
      }
      Self::Source { path, source } => {
        write!(f, "failed to build from {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for BundleError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } | Self::Source { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
      Self::MissingBundle { .. } | Self::MissingOutput { .. } | Self::ExternalSource { .. } => {
        None
      }
    }
  }
}
