//! `doc-assets`: build-time helpers for documentation sites.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use doc_asset_tools::config::{DEFAULT_CONFIG_FILE, DocToolsConfig};
use doc_asset_tools::directive::DirectiveTable;
use doc_asset_tools::document::{SourceFormat, expand_source, process_path};
use doc_asset_tools::manifest;

#[derive(Parser)]
#[command(name = "doc-assets")]
#[command(about = "Build-time helpers for documentation sites")]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Path to the tool configuration file
  #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
  config: PathBuf,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve the script and style bundles and write the template fragment
  Assets {
    /// YAML bundle description (defaults to the configured path)
    #[arg(short, long)]
    bundles: Option<PathBuf>,

    /// Template fragment to write (defaults to the configured path)
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Expand directive blocks in a source file or directory
  Directives {
    /// Source file or directory
    input: PathBuf,

    /// Output file or directory; a single file is printed when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::new("info")
  };
  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  let config = load_config(&cli.config)?;

  match cli.command {
    Commands::Assets { bundles, output } => {
      let root = Path::new(".");
      let bundles = bundles.unwrap_or_else(|| config.assets_config_path(root));
      let output = output.unwrap_or_else(|| config.assets_output_path(root));
      manifest::run_with_layout(&bundles, &output, &config.to_layout())?;
    }
    Commands::Directives { input, output } => {
      let table = DirectiveTable::builtin();
      match output {
        Some(output) => {
          let written = process_path(&table, &input, &output)?;
          tracing::info!(files = written, output = %output.display(), "expanded directives");
        }
        None => {
          if input.is_dir() {
            bail!("an --output directory is required when expanding a directory");
          }
          let Some(format) = SourceFormat::from_path(&input) else {
            bail!("unsupported source format: {}", input.display());
          };
          let text = fs::read_to_string(&input)
            .with_context(|| format!("failed to read {}", input.display()))?;
          print!("{}", expand_source(&table, format, &text)?);
        }
      }
    }
  }

  Ok(())
}

/// Load the configuration file named on the command line.
///
/// The default file name is optional and discovered in the working directory; an explicitly
/// named file must exist and parse.
fn load_config(path: &Path) -> Result<DocToolsConfig> {
  if path == Path::new(DEFAULT_CONFIG_FILE) {
    return Ok(DocToolsConfig::discover(Path::new(".")));
  }

  DocToolsConfig::load(path)
    .with_context(|| format!("failed to load configuration from {}", path.display()))
}
