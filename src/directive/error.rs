/// Errors raised while running a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
  /// No directive is registered under the requested name.
  Unknown {
    /// Requested directive name.
    directive: String,
  },
  /// The directive requires block content but none was given.
  MissingContent {
    /// Directive name.
    directive: String,
  },
}

impl std::fmt::Display for DirectiveError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Unknown { directive } => write!(f, "unknown directive type `{directive}`"),
      Self::MissingContent { directive } => {
        write!(f, "content block expected for the `{directive}` directive; none found")
      }
    }
  }
}

impl std::error::Error for DirectiveError {}
