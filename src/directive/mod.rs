//! Custom block directives and the registry that dispatches them.

mod error;
pub mod hero;

use std::collections::BTreeMap;

use crate::doctree::{DocTree, Node, NodeBuilder};

pub use error::DirectiveError;
pub use hero::HeroDirective;

/// A single occurrence of a directive in a source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveInvocation {
  /// Directive name as written by the author.
  pub name: String,
  /// Text following the directive marker on its opening line, trimmed.
  pub arguments: String,
  /// Block content lines, dedented, without leading or trailing blank lines.
  pub content: Vec<String>,
}

impl DirectiveInvocation {
  /// Build an invocation from raw block lines, normalising their indentation.
  pub fn new(name: &str, arguments: &str, lines: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      arguments: arguments.trim().to_string(),
      content: normalise_content(lines),
    }
  }
}

/// A block directive turning its invocation into document nodes.
pub trait Directive<B: NodeBuilder> {
  /// Returns `true` when text following the directive marker is an argument.
  ///
  /// Otherwise that text becomes the first content line.
  fn accepts_arguments(&self) -> bool {
    false
  }

  /// Build the nodes replacing the directive in the document.
  fn run(
    &self,
    invocation: &DirectiveInvocation,
    builder: &mut B,
  ) -> Result<Vec<B::Node>, DirectiveError>;
}

/// Host side of directive registration, handed to extension setup functions.
pub trait DirectiveRegistry {
  /// Node builder the registered directives run against.
  type Builder: NodeBuilder;

  /// Register `directive` under `name`, replacing any earlier registration.
  fn register_directive(&mut self, name: &str, directive: Box<dyn Directive<Self::Builder>>);
}

/// Extension setup function installing directives into a [`DirectiveTable`].
pub type Extension = fn(&mut DirectiveTable);

/// Directive registry building [`Node`] trees.
#[derive(Default)]
pub struct DirectiveTable {
  directives: BTreeMap<String, Box<dyn Directive<DocTree>>>,
}

impl DirectiveTable {
  /// Create a table with every extension in `extensions` set up, in order.
  pub fn with_extensions(extensions: &[Extension]) -> Self {
    let mut table = Self::default();
    for setup in extensions {
      setup(&mut table);
    }
    table
  }

  /// Table with the directives shipped by this crate.
  pub fn builtin() -> Self {
    Self::with_extensions(&[hero::setup::<DirectiveTable>])
  }

  /// Returns `true` when a directive is registered under `name`.
  pub fn contains(&self, name: &str) -> bool {
    self.directives.contains_key(name)
  }

  /// Registered directive names, sorted.
  pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
    self.directives.keys().map(String::as_str)
  }

  /// Run the directive named by `invocation`.
  pub fn invoke(&self, invocation: &DirectiveInvocation) -> Result<Vec<Node>, DirectiveError> {
    let directive =
      self
        .directives
        .get(&invocation.name)
        .ok_or_else(|| DirectiveError::Unknown {
          directive: invocation.name.clone(),
        })?;

    if invocation.arguments.is_empty() || directive.accepts_arguments() {
      return directive.run(invocation, &mut DocTree);
    }

    // Text after the marker opens the content block of directives without arguments.
    let mut content = Vec::with_capacity(invocation.content.len() + 1);
    content.push(invocation.arguments.clone());
    content.extend(invocation.content.iter().cloned());
    let folded = DirectiveInvocation {
      name: invocation.name.clone(),
      arguments: String::new(),
      content,
    };
    directive.run(&folded, &mut DocTree)
  }
}

impl DirectiveRegistry for DirectiveTable {
  type Builder = DocTree;

  fn register_directive(&mut self, name: &str, directive: Box<dyn Directive<DocTree>>) {
    if self.directives.insert(name.to_string(), directive).is_some() {
      tracing::debug!(directive = name, "replaced existing directive registration");
    }
  }
}

/// Strip the common indentation and surrounding blank lines from block content.
///
/// Trailing whitespace is removed from every line, so whitespace-only lines become empty.
fn normalise_content(lines: &[&str]) -> Vec<String> {
  let indent = lines
    .iter()
    .filter(|line| !line.trim().is_empty())
    .map(|line| line.chars().take_while(|ch| ch.is_whitespace()).count())
    .min()
    .unwrap_or(0);

  let mut content: Vec<String> = lines
    .iter()
    .map(|line| {
      if line.trim().is_empty() {
        return String::new();
      }
      let start = line
        .char_indices()
        .nth(indent)
        .map_or(line.len(), |(offset, _)| offset);
      line[start..].trim_end().to_string()
    })
    .collect();

  while content.last().is_some_and(String::is_empty) {
    content.pop();
  }
  let leading = content.iter().take_while(|line| line.is_empty()).count();
  content.drain(..leading);
  content
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Echo;

  impl<B: NodeBuilder> Directive<B> for Echo {
    fn accepts_arguments(&self) -> bool {
      true
    }

    fn run(
      &self,
      invocation: &DirectiveInvocation,
      builder: &mut B,
    ) -> Result<Vec<B::Node>, DirectiveError> {
      Ok(vec![builder.paragraph(&invocation.arguments)])
    }
  }

  fn echo_setup(table: &mut DirectiveTable) {
    table.register_directive("echo", Box::new(Echo));
  }

  #[test]
  fn normalises_indentation_and_blank_edges() {
    let invocation = DirectiveInvocation::new("hero", "", &[
      "",
      "   rocket",
      "   Hello  ",
      "      nested",
      "   ",
      "   World",
      "",
    ]);
    assert_eq!(invocation.content, vec![
      "rocket".to_string(),
      "Hello".to_string(),
      "   nested".to_string(),
      String::new(),
      "World".to_string(),
    ]);
  }

  #[test]
  fn builtin_table_registers_hero() {
    let table = DirectiveTable::builtin();
    assert!(table.contains("hero"));
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["hero"]);
  }

  #[test]
  fn extensions_are_applied_in_order() {
    let table = DirectiveTable::with_extensions(&[hero::setup::<DirectiveTable>, echo_setup]);
    let nodes = table
      .invoke(&DirectiveInvocation::new("echo", " hi ", &[]))
      .unwrap();
    assert_eq!(nodes, vec![Node::Paragraph { text: "hi".into() }]);
  }

  #[test]
  fn unknown_directives_are_errors() {
    let table = DirectiveTable::builtin();
    let err = table
      .invoke(&DirectiveInvocation::new("note", "", &["text"]))
      .unwrap_err();
    assert!(matches!(err, DirectiveError::Unknown { directive } if directive == "note"));
  }

  #[test]
  fn marker_text_opens_content_without_arguments() {
    let table = DirectiveTable::builtin();
    let nodes = table
      .invoke(&DirectiveInvocation::new("hero", "rocket", &["", "   Hello"]))
      .unwrap();
    assert_eq!(
      crate::doctree::render_html(&nodes),
      "<span class=\"hero\"><span class=\"fa fa-rocket\"></span><p>Hello</p></span>"
    );
  }
}
