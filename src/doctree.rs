//! Minimal document tree produced by directives.

/// Output interface directives build their nodes through.
///
/// Keeping node construction behind this trait lets directive logic run against any tree
/// representation, including the in-crate [`DocTree`].
pub trait NodeBuilder {
  /// Node type produced by the builder.
  type Node;

  /// Create an empty inline container carrying `classes`.
  fn container(&mut self, classes: &[&str]) -> Self::Node;

  /// Create an empty inline node carrying `classes`.
  fn inline(&mut self, classes: &[&str]) -> Self::Node;

  /// Create a paragraph holding `text`.
  fn paragraph(&mut self, text: &str) -> Self::Node;

  /// Append `child` as the last child of `parent`.
  fn append(&mut self, parent: &mut Self::Node, child: Self::Node);
}

/// Node of the in-crate document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// Inline element with style classes and children.
  Inline {
    /// Style classes, in insertion order.
    classes: Vec<String>,
    /// Child nodes, in insertion order.
    children: Vec<Node>,
  },
  /// Paragraph of plain text.
  Paragraph {
    /// Paragraph text.
    text: String,
  },
}

impl Node {
  /// Child nodes; paragraphs have none.
  pub fn children(&self) -> &[Node] {
    match self {
      Self::Inline { children, .. } => children,
      Self::Paragraph { .. } => &[],
    }
  }

  /// Style classes; paragraphs have none.
  pub fn classes(&self) -> &[String] {
    match self {
      Self::Inline { classes, .. } => classes,
      Self::Paragraph { .. } => &[],
    }
  }

  /// Render the node as HTML.
  pub fn to_html(&self) -> String {
    let mut html = String::new();
    self.write_html(&mut html);
    html
  }

  fn write_html(&self, html: &mut String) {
    match self {
      Self::Inline { classes, children } => {
        if classes.is_empty() {
          html.push_str("<span>");
        } else {
          html.push_str("<span class=\"");
          html.push_str(&escape_html(&classes.join(" ")));
          html.push_str("\">");
        }
        for child in children {
          child.write_html(html);
        }
        html.push_str("</span>");
      }
      Self::Paragraph { text } => {
        html.push_str("<p>");
        html.push_str(&escape_html(text));
        html.push_str("</p>");
      }
    }
  }
}

/// [`NodeBuilder`] producing [`Node`] values.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocTree;

impl NodeBuilder for DocTree {
  type Node = Node;

  fn container(&mut self, classes: &[&str]) -> Node {
    self.inline(classes)
  }

  fn inline(&mut self, classes: &[&str]) -> Node {
    Node::Inline {
      classes: classes.iter().map(|class| class.to_string()).collect(),
      children: Vec::new(),
    }
  }

  fn paragraph(&mut self, text: &str) -> Node {
    Node::Paragraph {
      text: text.to_string(),
    }
  }

  fn append(&mut self, parent: &mut Node, child: Node) {
    match parent {
      Node::Inline { children, .. } => children.push(child),
      Node::Paragraph { text } => {
        tracing::warn!(paragraph = %text, "dropping child appended to a paragraph");
      }
    }
  }
}

/// Render a list of nodes as concatenated HTML.
pub fn render_html(nodes: &[Node]) -> String {
  nodes.iter().map(Node::to_html).collect()
}

fn escape_html(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}
