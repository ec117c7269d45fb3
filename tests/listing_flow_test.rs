//! End-to-end listing state machine flows: navigation, refresh and the
//! revision gate that drops slow out-of-order responses.

use alistui::api::FileEntry;
use alistui::logic::file_type::TypeFilter;
use alistui::model::{ListingModel, ListingPhase};
use alistui::store::Preferences;

fn entry(name: &str, is_dir: bool, size: u64) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        size,
        is_dir,
        modified: String::new(),
        sign: String::new(),
        thumb: String::new(),
        file_type: 0,
    }
}

#[test]
fn slow_response_for_old_directory_never_wins() {
    let mut listing = ListingModel::default();

    // User enters /movies, then immediately backs out to /
    let movies_rev = listing.navigate("/movies".to_string());
    let root_rev = listing.navigate("/".to_string());

    // The root listing arrives first
    assert!(listing.apply_entries(root_rev, vec![entry("docs", true, 0)]));
    assert_eq!(listing.phase, ListingPhase::Ready);

    // The stale /movies response lands afterwards and must be ignored
    assert!(!listing.apply_entries(movies_rev, vec![entry("old.mp4", false, 9)]));
    assert_eq!(listing.path, "/");
    assert_eq!(listing.entries.len(), 1);
    assert_eq!(listing.entries[0].name, "docs");
}

#[test]
fn rapid_navigation_only_renders_the_last_directory() {
    let mut listing = ListingModel::default();
    let revs: Vec<u64> = ["/a", "/a/b", "/a/b/c"]
        .iter()
        .map(|p| listing.navigate(p.to_string()))
        .collect();

    // Responses arrive in a scrambled order
    assert!(!listing.apply_entries(revs[1], vec![entry("b-stuff", false, 1)]));
    assert!(listing.apply_entries(revs[2], vec![entry("c-stuff", false, 1)]));
    assert!(!listing.apply_entries(revs[0], vec![entry("a-stuff", false, 1)]));

    assert_eq!(listing.path, "/a/b/c");
    assert_eq!(listing.entries[0].name, "c-stuff");
}

#[test]
fn refresh_failure_keeps_showing_the_old_listing() {
    let mut listing = ListingModel::default();
    let rev = listing.navigate("/docs".to_string());
    listing.apply_entries(rev, vec![entry("a.txt", false, 1), entry("b.txt", false, 2)]);

    let refresh = listing.begin_refresh();
    assert!(listing.apply_error(refresh, "connection reset".to_string()));

    // The stale entries stay browsable behind the error banner
    assert_eq!(listing.entries.len(), 2);
    assert!(matches!(listing.phase, ListingPhase::Error(_)));

    // A later successful refresh clears the error
    let retry = listing.begin_refresh();
    assert!(listing.apply_entries(retry, vec![entry("a.txt", false, 1)]));
    assert_eq!(listing.phase, ListingPhase::Ready);
}

#[test]
fn navigation_resets_search_filter_and_selection() {
    let mut listing = ListingModel::default();
    let rev = listing.navigate("/".to_string());
    listing.apply_entries(
        rev,
        vec![entry("keep.mkv", false, 5), entry("drop.txt", false, 3)],
    );
    listing.search = "keep".to_string();
    listing.filter = TypeFilter::Video;
    listing.enter_selection("keep.mkv".to_string());

    listing.navigate("/sub".to_string());
    assert!(listing.search.is_empty());
    assert_eq!(listing.filter, TypeFilter::All);
    assert!(!listing.selection_mode);
    assert!(listing.selected_names().is_empty());
}

#[test]
fn visible_entries_follow_preferences() {
    let mut listing = ListingModel::default();
    let rev = listing.navigate("/".to_string());
    listing.apply_entries(
        rev,
        vec![
            entry("big.bin", false, 1000),
            entry("small.bin", false, 10),
            entry("nested", true, 0),
        ],
    );

    let mut prefs = Preferences::default();
    prefs.sort_key = alistui::SortKey::Size;
    prefs.sort_order = alistui::SortOrder::Descending;
    prefs.folders_first = false;

    let view = listing.visible_entries(&prefs);
    let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["big.bin", "small.bin", "nested"]);
}
