//! The `hero` directive: an icon followed by paragraphs, styled as a page header block.
//!
//! ```rst
//! .. hero::
//!
//!    rocket
//!    Fast builds.
//!    No configuration.
//! ```
//!
//! The first content line names the icon; each following non-blank line becomes a
//! paragraph.

use crate::directive::{Directive, DirectiveError, DirectiveInvocation, DirectiveRegistry};
use crate::doctree::NodeBuilder;

/// Name the directive is registered under.
pub const DIRECTIVE_NAME: &str = "hero";
/// Style class of the container node.
pub const HERO_CLASS: &str = "hero";
/// Class prefix of the icon font; the icon name is appended.
pub const ICON_CLASS_PREFIX: &str = "fa fa-";

/// Register the `hero` directive with the host.
pub fn setup<R: DirectiveRegistry + ?Sized>(app: &mut R) {
  app.register_directive(DIRECTIVE_NAME, Box::new(HeroDirective));
}

/// Directive rendering an icon plus paragraphs inside a `hero` container.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeroDirective;

impl<B: NodeBuilder> Directive<B> for HeroDirective {
  fn run(
    &self,
    invocation: &DirectiveInvocation,
    builder: &mut B,
  ) -> Result<Vec<B::Node>, DirectiveError> {
    let Some((icon_name, body)) = invocation.content.split_first() else {
      return Err(DirectiveError::MissingContent {
        directive: invocation.name.clone(),
      });
    };

    let mut hero = builder.container(&[HERO_CLASS]);
    let icon_class = format!("{ICON_CLASS_PREFIX}{icon_name}");
    let icon = builder.inline(&[icon_class.as_str()]);
    builder.append(&mut hero, icon);

    for line in body {
      if line.trim().is_empty() {
        continue;
      }
      let paragraph = builder.paragraph(line);
      builder.append(&mut hero, paragraph);
    }

    Ok(vec![hero])
  }
}
