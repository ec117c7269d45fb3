//! Properties of the derived view: filtering, sorting and grouping
//! compose without ever touching the raw entry list.

use alistui::api::FileEntry;
use alistui::logic::file_type::TypeFilter;
use alistui::logic::view::derive_view;
use alistui::{SortKey, SortOrder};

fn file(name: &str, size: u64, modified: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        size,
        is_dir: false,
        modified: modified.to_string(),
        sign: String::new(),
        thumb: String::new(),
        file_type: 0,
    }
}

fn dir(name: &str) -> FileEntry {
    FileEntry {
        is_dir: true,
        ..file(name, 0, "")
    }
}

fn names(view: &[FileEntry]) -> Vec<&str> {
    view.iter().map(|e| e.name.as_str()).collect()
}

fn sample() -> Vec<FileEntry> {
    vec![
        file("episode10.mkv", 900, "2024-02-01T10:00:00Z"),
        file("episode2.mkv", 700, "2024-01-15T10:00:00Z"),
        file("cover.jpg", 50, "2024-03-01T10:00:00Z"),
        file("Notes.TXT", 5, "2023-12-01T10:00:00Z"),
        dir("Extras"),
        dir("behind the scenes"),
    ]
}

#[test]
fn numeric_name_sort_orders_episode2_before_episode10() {
    let view = derive_view(
        &sample(),
        "",
        &TypeFilter::All,
        SortKey::Name,
        SortOrder::Ascending,
        false,
    );
    let ep2 = names(&view).iter().position(|n| *n == "episode2.mkv").unwrap();
    let ep10 = names(&view)
        .iter()
        .position(|n| *n == "episode10.mkv")
        .unwrap();
    assert!(ep2 < ep10, "natural sort must order 2 before 10");
}

#[test]
fn folders_first_groups_directories_regardless_of_sort() {
    for order in [SortOrder::Ascending, SortOrder::Descending] {
        let view = derive_view(
            &sample(),
            "",
            &TypeFilter::All,
            SortKey::Size,
            order,
            true,
        );
        let first_file = view.iter().position(|e| !e.is_dir).unwrap();
        assert!(
            view[..first_file].iter().all(|e| e.is_dir),
            "all directories must precede the first file"
        );
        assert_eq!(view[..first_file].len(), 2);
    }
}

#[test]
fn type_filter_keeps_directories_visible() {
    let view = derive_view(
        &sample(),
        "",
        &TypeFilter::Video,
        SortKey::Name,
        SortOrder::Ascending,
        true,
    );
    assert_eq!(
        names(&view),
        vec![
            "behind the scenes",
            "Extras",
            "episode2.mkv",
            "episode10.mkv"
        ]
    );
}

#[test]
fn extension_filter_normalizes_input() {
    // Users type ".MKV" or "mkv"; both mean the same filter
    for raw in ["mkv", ".mkv", "MKV"] {
        let filter = TypeFilter::extension(raw).expect(raw);
        let view = derive_view(
            &sample(),
            "",
            &filter,
            SortKey::Name,
            SortOrder::Ascending,
            false,
        );
        assert!(view
            .iter()
            .filter(|e| !e.is_dir)
            .all(|e| e.name.to_lowercase().ends_with(".mkv")));
        assert_eq!(view.iter().filter(|e| !e.is_dir).count(), 2);
    }
    assert!(TypeFilter::extension("   ").is_none());
}

#[test]
fn search_is_case_insensitive_and_applies_to_directories() {
    let view = derive_view(
        &sample(),
        "notes",
        &TypeFilter::All,
        SortKey::Name,
        SortOrder::Ascending,
        true,
    );
    assert_eq!(names(&view), vec!["Notes.TXT"]);

    // Unlike the type filter, search does hide directories
    let view = derive_view(
        &sample(),
        "episode",
        &TypeFilter::All,
        SortKey::Name,
        SortOrder::Ascending,
        true,
    );
    assert!(view.iter().all(|e| !e.is_dir));
}

#[test]
fn modified_sort_descending_puts_newest_first() {
    let view = derive_view(
        &sample(),
        "",
        &TypeFilter::All,
        SortKey::Modified,
        SortOrder::Descending,
        false,
    );
    let files: Vec<&str> = view
        .iter()
        .filter(|e| !e.is_dir)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(files[0], "cover.jpg");
    assert_eq!(*files.last().unwrap(), "Notes.TXT");
}

#[test]
fn deriving_twice_is_idempotent() {
    let entries = sample();
    let a = derive_view(
        &entries,
        "e",
        &TypeFilter::Video,
        SortKey::Size,
        SortOrder::Descending,
        true,
    );
    let b = derive_view(
        &entries,
        "e",
        &TypeFilter::Video,
        SortKey::Size,
        SortOrder::Descending,
        true,
    );
    assert_eq!(names(&a), names(&b));
}
