//! Rendering of template-language assignments.

/// Render a `{% set ... %}` line binding `variable` to the quoted `paths`.
///
/// Paths are joined with `', '` inside `['...']`, so an empty list still renders a single
/// empty string literal: `['']`.
pub fn render_assignment(variable: &str, paths: &[String]) -> String {
  format!("{{% set {} = ['{}'] %}}\n", variable, paths.join("', '"))
}

#[cfg(test)]
mod tests {
  use super::render_assignment;

  #[test]
  fn renders_paths_in_order() {
    let paths = vec!["_static/a.js".to_string(), "_static/b.js".to_string()];
    assert_eq!(
      render_assignment("script_files", &paths),
      "{% set script_files = ['_static/a.js', '_static/b.js'] %}\n"
    );
  }

  #[test]
  fn renders_single_path() {
    let paths = vec!["assets/site.css".to_string()];
    assert_eq!(
      render_assignment("css_files", &paths),
      "{% set css_files = ['assets/site.css'] %}\n"
    );
  }

  #[test]
  fn empty_lists_render_an_empty_literal() {
    assert_eq!(
      render_assignment("css_files", &[]),
      "{% set css_files = [''] %}\n"
    );
  }
}
