//! Logical path to storage key mapping.

/// Strip a leading `"{scope}/"` from `path`, once.
///
/// The scope comparison ignores case, folded the same way as
/// [`scope_name`]. Paths that do not start with the scope prefix, including
/// empty strings, are returned unchanged.
///
/// # Examples
///
/// ```
/// use coffer_core::normalize_path;
///
/// assert_eq!(normalize_path("uploads/docs/a.txt", "uploads"), "docs/a.txt");
/// assert_eq!(normalize_path("Uploads/docs/a.txt", "uploads"), "docs/a.txt");
/// assert_eq!(normalize_path("docs/a.txt", "uploads"), "docs/a.txt");
/// assert_eq!(normalize_path("uploads", "uploads"), "uploads");
/// assert_eq!(normalize_path("MÉDIA/a.txt", "média"), "a.txt");
/// ```
pub fn normalize_path<'a>(path: &'a str, scope: &str) -> &'a str {
    let scope = scope_name(scope);
    path.match_indices('/')
        .find(|(index, _)| scope_name(&path[..*index]) == scope)
        .map(|(index, _)| &path[index + 1..])
        .unwrap_or(path)
}

/// Last `/`-separated segment of `path`.
///
/// # Examples
///
/// ```
/// use coffer_core::file_name_of;
///
/// assert_eq!(file_name_of("uploads/docs/a.txt"), "a.txt");
/// assert_eq!(file_name_of("a.txt"), "a.txt");
/// assert_eq!(file_name_of(""), "");
/// ```
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Canonical form of a container name.
pub fn scope_name(name: &str) -> String {
    name.to_lowercase()
}
