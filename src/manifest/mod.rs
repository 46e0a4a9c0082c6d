//! Asset manifest generation: resolve the script and style bundles and write the template
//! fragment that references them.

mod generation;
mod snippet;

pub use generation::{AssetManifest, ManifestBuilder, ManifestLayout, run, run_with, run_with_layout};
pub use snippet::render_assignment;
