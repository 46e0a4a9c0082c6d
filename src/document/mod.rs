//! Expansion of directive blocks inside documentation sources.

mod markdown;
mod rst;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::directive::DirectiveTable;

pub use markdown::expand_markdown;
pub use rst::expand_rst;

/// Markup language of a documentation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
  /// `.rst` sources using `.. name::` directive blocks.
  ReStructuredText,
  /// `.md` / `.markdown` sources using ```` ```{name} ```` fences.
  Markdown,
}

impl SourceFormat {
  /// Detect the format from a file extension.
  pub fn from_path(path: &Path) -> Option<Self> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
      "rst" => Some(Self::ReStructuredText),
      "md" | "markdown" => Some(Self::Markdown),
      _ => None,
    }
  }
}

/// Expand every registered directive in `text`.
pub fn expand_source(table: &DirectiveTable, format: SourceFormat, text: &str) -> Result<String> {
  match format {
    SourceFormat::ReStructuredText => expand_rst(table, text),
    SourceFormat::Markdown => expand_markdown(table, text),
  }
}

/// Expand one source file, or every source below a directory, into `output`.
///
/// A file input writes the file at `output`; a directory input mirrors its source files
/// below `output`. Files of unknown formats inside a directory are skipped. Returns the
/// number of files written.
pub fn process_path(table: &DirectiveTable, input: &Path, output: &Path) -> Result<usize> {
  if input.is_dir() {
    return process_dir(table, input, output);
  }

  let Some(format) = SourceFormat::from_path(input) else {
    bail!("unsupported source format: {}", input.display());
  };
  process_file(table, format, input, output)?;
  Ok(1)
}

fn process_dir(table: &DirectiveTable, input: &Path, output: &Path) -> Result<usize> {
  let mut written = 0;
  let mut entries = fs::read_dir(input)
    .with_context(|| format!("failed to read directory {}", input.display()))?
    .collect::<std::io::Result<Vec<_>>>()
    .with_context(|| format!("failed to read directory {}", input.display()))?;
  entries.sort_by_key(|entry| entry.file_name());

  for entry in entries {
    let path = entry.path();
    let destination = output.join(entry.file_name());
    if entry.file_type()?.is_dir() {
      written += process_dir(table, &path, &destination)?;
      continue;
    }

    match SourceFormat::from_path(&path) {
      Some(format) => {
        process_file(table, format, &path, &destination)?;
        written += 1;
      }
      None => tracing::debug!(path = %path.display(), "skipping non-source file"),
    }
  }

  Ok(written)
}

fn process_file(
  table: &DirectiveTable,
  format: SourceFormat,
  input: &Path,
  output: &Path,
) -> Result<()> {
  let text = fs::read_to_string(input)
    .with_context(|| format!("failed to read {}", input.display()))?;
  let expanded = expand_source(table, format, &text)
    .with_context(|| format!("failed to expand directives in {}", input.display()))?;

  if let Some(parent) = output.parent() {
    fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
  }
  fs::write(output, expanded).with_context(|| format!("failed to write {}", output.display()))?;
  tracing::debug!(input = %input.display(), output = %output.display(), "expanded source");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn detects_formats_from_extensions() {
    assert_eq!(
      SourceFormat::from_path(Path::new("index.rst")),
      Some(SourceFormat::ReStructuredText)
    );
    assert_eq!(
      SourceFormat::from_path(Path::new("README.MD")),
      Some(SourceFormat::Markdown)
    );
    assert_eq!(SourceFormat::from_path(Path::new("site.js")), None);
    assert_eq!(SourceFormat::from_path(Path::new("Makefile")), None);
  }

  #[test]
  fn mirrors_directory_trees() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("source");
    let output = dir.path().join("build");
    fs::create_dir_all(input.join("guide")).unwrap();
    fs::write(input.join("index.rst"), ".. hero::\n\n   rocket\n   Welcome\n").unwrap();
    fs::write(input.join("guide/intro.md"), "```{hero}\nbook\n```\n").unwrap();
    fs::write(input.join("conf.py"), "project = 'docs'\n").unwrap();

    let table = DirectiveTable::builtin();
    let written = process_path(&table, &input, &output).unwrap();

    assert_eq!(written, 2);
    let index = fs::read_to_string(output.join("index.rst")).unwrap();
    assert!(index.contains(".. raw:: html"));
    assert!(index.contains("<p>Welcome</p>"));
    let intro = fs::read_to_string(output.join("guide/intro.md")).unwrap();
    assert!(intro.contains("fa fa-book"));
    assert!(!output.join("conf.py").exists());
  }

  #[test]
  fn rejects_single_files_of_unknown_format() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "text").unwrap();

    let err = process_path(&DirectiveTable::builtin(), &input, &dir.path().join("out.txt"))
      .unwrap_err();
    assert!(err.to_string().starts_with("unsupported source format"));
  }

  #[test]
  fn directive_errors_name_the_source_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.rst");
    fs::write(&input, ".. hero::\n").unwrap();

    let err = process_path(&DirectiveTable::builtin(), &input, &dir.path().join("out.rst"))
      .unwrap_err();
    assert!(err.to_string().starts_with("failed to expand directives in"));
  }
}
