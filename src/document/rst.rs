//! Directive expansion for reStructuredText sources.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::directive::{DirectiveInvocation, DirectiveTable};
use crate::doctree::render_html;

fn directive_marker() -> &'static Regex {
  static MARKER: OnceLock<Regex> = OnceLock::new();
  MARKER.get_or_init(|| {
    Regex::new(r"^(?P<indent>[ \t]*)\.\.[ \t]+(?P<name>[A-Za-z0-9_-]+)::(?:[ \t]+(?P<args>.*?))?[ \t\r]*$")
      .expect("invalid directive marker regex")
  })
}

fn explicit_markup() -> &'static Regex {
  static MARKUP: OnceLock<Regex> = OnceLock::new();
  MARKUP.get_or_init(|| Regex::new(r"^[ \t]*\.\.(?:[ \t]|$)").expect("invalid explicit markup regex"))
}

/// Replace every registered directive block with a `.. raw:: html` block of its output.
///
/// A block is the marker line plus every following line that is blank or indented deeper
/// than the marker. Trailing blank lines stay outside the block. Blocks of unregistered
/// directives, comments and `::` literal blocks are copied through untouched, including
/// any directive markers written inside them.
pub fn expand_rst(table: &DirectiveTable, text: &str) -> Result<String> {
  let lines: Vec<&str> = text.split('\n').collect();
  let mut output: Vec<String> = Vec::with_capacity(lines.len());
  let mut index = 0;

  while index < lines.len() {
    let line = lines[index];
    let marker = directive_marker()
      .captures(line)
      .filter(|captures| table.contains(&captures["name"]));
    let Some(captures) = marker else {
      let end = if explicit_markup().is_match(line) || opens_literal_block(line) {
        block_end(&lines, index, leading_width(line))
      } else {
        index + 1
      };
      if end > index + 1 {
        tracing::debug!(line = index + 1, "copying unexpanded block");
      }
      output.extend(lines[index..end].iter().map(|line| line.to_string()));
      index = end;
      continue;
    };

    let name = &captures["name"];
    let indent = &captures["indent"];
    let end = block_end(&lines, index, indent.chars().count());

    let arguments = captures.name("args").map_or("", |args| args.as_str());
    let invocation = DirectiveInvocation::new(name, arguments, &lines[index + 1..end]);
    let nodes = table
      .invoke(&invocation)
      .with_context(|| format!("`{name}` directive on line {}", index + 1))?;

    output.push(format!("{indent}.. raw:: html"));
    output.push(String::new());
    output.push(format!("{indent}   {}", render_html(&nodes)));
    index = end;
  }

  Ok(output.join("\n"))
}

/// End (exclusive) of the block opened at `start`: every following line that is blank or
/// indented deeper than `indent_width`, minus trailing blank lines.
fn block_end(lines: &[&str], start: usize, indent_width: usize) -> usize {
  let mut end = start + 1;
  while end < lines.len() {
    let candidate = lines[end];
    if candidate.trim().is_empty() || leading_width(candidate) > indent_width {
      end += 1;
    } else {
      break;
    }
  }
  while end > start + 1 && lines[end - 1].trim().is_empty() {
    end -= 1;
  }
  end
}

fn opens_literal_block(line: &str) -> bool {
  line.trim_end().ends_with("::")
}

fn leading_width(line: &str) -> usize {
  line.chars().take_while(|ch| *ch == ' ' || *ch == '\t').count()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replaces_hero_block_with_raw_html() {
    let source = "Title\n=====\n\n.. hero::\n\n   rocket\n   Hello\n\n   World\n\nAfter.\n";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();

    assert_eq!(
      expanded,
      "Title\n=====\n\n.. raw:: html\n\n   <span class=\"hero\"><span class=\"fa fa-rocket\"></span><p>Hello</p><p>World</p></span>\n\nAfter.\n"
    );
  }

  #[test]
  fn keeps_indentation_of_nested_blocks() {
    let source = "* item\n\n  .. hero::\n\n     star\n\n  tail\n";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();
    assert_eq!(
      expanded,
      "* item\n\n  .. raw:: html\n\n     <span class=\"hero\"><span class=\"fa fa-star\"></span></span>\n\n  tail\n"
    );
  }

  #[test]
  fn leaves_unregistered_directives_alone() {
    let source = ".. note::\n\n   Keep me.\n";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();
    assert_eq!(expanded, source);
  }

  #[test]
  fn block_at_end_of_file_is_expanded() {
    let source = ".. hero::\n\n   bolt\n   Last words";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();
    assert_eq!(
      expanded,
      ".. raw:: html\n\n   <span class=\"hero\"><span class=\"fa fa-bolt\"></span><p>Last words</p></span>"
    );
  }

  #[test]
  fn empty_hero_reports_line() {
    let source = "Intro\n\n.. hero::\n\nText\n";
    let err = expand_rst(&DirectiveTable::builtin(), source).unwrap_err();
    assert_eq!(err.to_string(), "`hero` directive on line 3");
    assert!(err.root_cause().to_string().contains("content block expected"));
  }

  #[test]
  fn marker_line_text_names_the_icon() {
    let source = ".. hero:: rocket\n\n   Hello\n";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();
    assert_eq!(
      expanded,
      ".. raw:: html\n\n   <span class=\"hero\"><span class=\"fa fa-rocket\"></span><p>Hello</p></span>\n"
    );
  }

  #[test]
  fn code_block_examples_are_not_expanded() {
    let source = ".. code-block:: rst\n\n   .. hero::\n\n      rocket\n\nAfter.\n";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();
    assert_eq!(expanded, source);
  }

  #[test]
  fn literal_blocks_are_not_expanded() {
    let source = "Usage::\n\n   .. hero::\n\n      rocket\n\n.. hero::\n\n   star\n";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();
    assert_eq!(
      expanded,
      "Usage::\n\n   .. hero::\n\n      rocket\n\n.. raw:: html\n\n   <span class=\"hero\"><span class=\"fa fa-star\"></span></span>\n"
    );
  }

  #[test]
  fn comments_are_copied_whole() {
    let source = "..\n   .. hero::\n\n      rocket\n\nText\n";
    let expanded = expand_rst(&DirectiveTable::builtin(), source).unwrap();
    assert_eq!(expanded, source);
  }
}
