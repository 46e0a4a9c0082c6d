//! Asset environment: loads the YAML bundle description and resolves bundles to URLs.

mod environment;
mod error;
mod resolve;

pub use environment::Environment;
pub use error::BundleError;

/// Anything able to resolve a named bundle into its ordered list of URLs.
pub trait BundleResolver {
  /// Resolve `bundle` into URLs, in load order.
  fn urls(&self, bundle: &str) -> Result<Vec<String>, BundleError>;
}
