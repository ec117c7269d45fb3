//! Remote Path Utilities
//!
//! AList addresses everything by absolute, '/'-separated paths ("/" is the
//! storage root). These helpers keep path strings in that canonical shape:
//! a single leading slash, no trailing slash except for the root itself.

/// Join a directory path and an entry name into a canonical absolute path
///
/// # Example
/// ```
/// use alistui::logic::path::join;
/// assert_eq!(join("/", "movies"), "/movies");
/// assert_eq!(join("/movies", "cam.mp4"), "/movies/cam.mp4");
/// ```
pub fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    let name = name.trim_matches('/');
    if name.is_empty() {
        return if dir.is_empty() { "/".to_string() } else { dir.to_string() };
    }
    format!("{}/{}", dir, name)
}

/// Parent directory of a path; the root is its own parent
pub fn parent(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
    }
}

/// Final component of a path; empty for the root
pub fn leaf(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Split a path into (parent directory, entry name)
///
/// The remove endpoint wants the two halves separately.
pub fn split_parent(path: &str) -> (String, String) {
    (parent(path), leaf(path).to_string())
}

/// Reduce a server-supplied entry name to a bare file name safe to join
/// into a local directory
///
/// Listing and detail responses are untrusted; a name carrying path
/// separators or `..` would escape the destination directory. Separators
/// are stripped down to the final component, and names that leave no
/// usable component yield `None`.
pub fn local_leaf(name: &str) -> Option<&str> {
    let component = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    if component.is_empty() || component == "." || component == ".." {
        return None;
    }
    Some(component)
}

/// Canonicalize user-entered paths: force a leading slash, collapse
/// duplicate separators, drop any trailing slash except on the root
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    for part in path.split('/').filter(|p| !p.is_empty()) {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_root_and_nested() {
        assert_eq!(join("/", "a"), "/a");
        assert_eq!(join("/a/b", "c.txt"), "/a/b/c.txt");
        assert_eq!(join("/a/", "c.txt"), "/a/c.txt");
    }

    #[test]
    fn test_join_empty_name_keeps_dir() {
        assert_eq!(join("/a", ""), "/a");
        assert_eq!(join("/", ""), "/");
    }

    #[test]
    fn test_parent_walks_up() {
        assert_eq!(parent("/a/b/c"), "/a/b");
        assert_eq!(parent("/a"), "/");
        assert_eq!(parent("/"), "/");
    }

    #[test]
    fn test_leaf_of_paths() {
        assert_eq!(leaf("/a/b/c.txt"), "c.txt");
        assert_eq!(leaf("/a"), "a");
        assert_eq!(leaf("/"), "");
    }

    #[test]
    fn test_split_parent_for_remove() {
        assert_eq!(
            split_parent("/movies/cam.mp4"),
            ("/movies".to_string(), "cam.mp4".to_string())
        );
        assert_eq!(split_parent("/top"), ("/".to_string(), "top".to_string()));
    }

    #[test]
    fn test_local_leaf_strips_traversal() {
        assert_eq!(local_leaf("cam.mp4"), Some("cam.mp4"));
        assert_eq!(local_leaf("../evil.sh"), Some("evil.sh"));
        assert_eq!(local_leaf("a/b\\c.txt"), Some("c.txt"));
        assert_eq!(local_leaf(".."), None);
        assert_eq!(local_leaf("."), None);
        assert_eq!(local_leaf("dir/"), None);
        assert_eq!(local_leaf("   "), None);
    }

    #[test]
    fn test_normalize_user_input() {
        assert_eq!(normalize("a/b"), "/a/b");
        assert_eq!(normalize("//a//b/"), "/a/b");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
    }
}
