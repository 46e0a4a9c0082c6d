/// Join a source path onto the environment URL prefix.
///
/// Exactly one `/` separates the two parts, so an empty prefix yields a root-relative URL.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Rewrite a resolved script URL by prepending the static-asset root.
///
/// The root is prepended literally, so `_static` and `/assets/site.js` become
/// `_static/assets/site.js`.
pub fn script_relative_path(static_root: &str, url: &str) -> String {
    format!("{static_root}{url}")
}

/// Rewrite a resolved stylesheet URL by dropping its first character.
///
/// The first character is removed whatever it is; resolved URLs normally start with `/`.
pub fn style_relative_path(url: &str) -> String {
    let mut chars = url.chars();
    chars.next();
    chars.as_str().to_string()
}
