//! Directive expansion for Markdown sources.
//!
//! Directives are written as fenced code blocks whose info string names the directive in
//! braces, e.g. ```` ```{hero} ````.

use std::ops::Range;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::directive::{DirectiveInvocation, DirectiveTable};
use crate::doctree::render_html;

fn fence_info() -> &'static Regex {
  static INFO: OnceLock<Regex> = OnceLock::new();
  INFO.get_or_init(|| {
    Regex::new(r"^\{(?P<name>[A-Za-z0-9_-]+)\}(?:\s+(?P<args>.*?))?\s*$")
      .expect("invalid fence info regex")
  })
}

struct OpenDirective {
  name: String,
  arguments: String,
  range: Range<usize>,
  body: String,
}

/// Replace every registered directive fence with the HTML of its output.
pub fn expand_markdown(table: &DirectiveTable, text: &str) -> Result<String> {
  let mut options = Options::empty();
  options.insert(Options::ENABLE_TABLES);
  options.insert(Options::ENABLE_FOOTNOTES);
  options.insert(Options::ENABLE_STRIKETHROUGH);
  options.insert(Options::ENABLE_TASKLISTS);
  options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

  let mut replacements: Vec<(Range<usize>, String)> = Vec::new();
  let mut open: Option<OpenDirective> = None;

  for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
    match event {
      Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
        open = parse_fence_info(&info)
          .filter(|(name, _)| table.contains(name))
          .map(|(name, arguments)| OpenDirective {
            name,
            arguments,
            range,
            body: String::new(),
          });
      }
      Event::Text(content) => {
        if let Some(directive) = open.as_mut() {
          directive.body.push_str(&content);
        }
      }
      Event::End(TagEnd::CodeBlock) => {
        if let Some(directive) = open.take() {
          let line = text[..directive.range.start].matches('\n').count() + 1;
          let lines: Vec<&str> = directive.body.lines().collect();
          let invocation = DirectiveInvocation::new(&directive.name, &directive.arguments, &lines);
          let nodes = table
            .invoke(&invocation)
            .with_context(|| format!("`{}` directive on line {line}", directive.name))?;

          let mut html = render_html(&nodes);
          if text[directive.range.clone()].ends_with('\n') {
            html.push('\n');
          }
          replacements.push((directive.range, html));
        }
      }
      _ => {}
    }
  }

  let mut expanded = text.to_string();
  for (range, html) in replacements.into_iter().rev() {
    expanded.replace_range(range, &html);
  }
  Ok(expanded)
}

fn parse_fence_info(info: &str) -> Option<(String, String)> {
  let captures = fence_info().captures(info.trim())?;
  let arguments = captures.name("args").map_or("", |args| args.as_str());
  Some((captures["name"].to_string(), arguments.to_string()))
}
