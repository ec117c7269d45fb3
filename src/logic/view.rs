//! Derivation of the visible listing
//!
//! The raw entry list from the server is never mutated. Search, type
//! filter and sort preferences are applied on the way out, so switching
//! them around can never corrupt the underlying data.

use crate::api::FileEntry;
use crate::logic::file_type::TypeFilter;
use crate::logic::sorting::compare_entries;
use crate::{SortKey, SortOrder};

/// Compute the rows the list should show
///
/// Search is a case-insensitive substring match on names. The type filter
/// applies to files only; directories always remain visible so the tree
/// stays navigable while filtering.
pub fn derive_view(
    entries: &[FileEntry],
    search: &str,
    filter: &TypeFilter,
    key: SortKey,
    order: SortOrder,
    folders_first: bool,
) -> Vec<FileEntry> {
    let needle = search.trim().to_lowercase();
    let mut view: Vec<FileEntry> = entries
        .iter()
        .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
        .filter(|e| e.is_dir || filter.matches(&e.name))
        .cloned()
        .collect();
    view.sort_by(|a, b| compare_entries(a, b, key, order, folders_first));
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            size: 0,
            is_dir,
            modified: String::new(),
            sign: String::new(),
            thumb: String::new(),
            file_type: 0,
        }
    }

    fn sample() -> Vec<FileEntry> {
        vec![
            entry("zeta.mp4", false),
            entry("Photos", true),
            entry("alpha.png", false),
            entry("notes.txt", false),
            entry("archive", true),
        ]
    }

    #[test]
    fn test_default_view_sorts_folders_first_naturally() {
        let view = derive_view(
            &sample(),
            "",
            &TypeFilter::All,
            SortKey::Name,
            SortOrder::Ascending,
            true,
        );
        let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["archive", "Photos", "alpha.png", "notes.txt", "zeta.mp4"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let view = derive_view(
            &sample(),
            "PHOT",
            &TypeFilter::All,
            SortKey::Name,
            SortOrder::Ascending,
            true,
        );
        let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Photos"]);
    }

    #[test]
    fn test_type_filter_spares_directories() {
        let view = derive_view(
            &sample(),
            "",
            &TypeFilter::Video,
            SortKey::Name,
            SortOrder::Ascending,
            true,
        );
        let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["archive", "Photos", "zeta.mp4"]);
    }

    #[test]
    fn test_search_and_filter_compose() {
        let view = derive_view(
            &sample(),
            "a",
            &TypeFilter::Image,
            SortKey::Name,
            SortOrder::Ascending,
            true,
        );
        let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
        // "archive" matches the search and is a directory; alpha.png passes
        // both; zeta.mp4 fails the filter
        assert_eq!(names, vec!["archive", "alpha.png"]);
    }

    #[test]
    fn test_source_entries_are_untouched() {
        let entries = sample();
        let _ = derive_view(
            &entries,
            "zzz-no-match",
            &TypeFilter::Video,
            SortKey::Size,
            SortOrder::Descending,
            false,
        );
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].name, "zeta.mp4");
    }
}
