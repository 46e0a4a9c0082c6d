/// Determine whether a bundle source refers to an external URL rather than a local file.
///
/// External sources are passed through untouched when resolving URLs and cannot be part of a
/// built output.
pub fn is_external_url(value: &str) -> bool {
    if value.starts_with("//") {
        return true;
    }

    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
