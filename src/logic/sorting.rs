//! Sorting comparison logic
//!
//! Pure functions for comparing file entries across different sort keys.

use crate::api::FileEntry;
use crate::{SortKey, SortOrder};
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two file names naturally: case-insensitive, with runs of digits
/// compared by numeric value instead of character order
///
/// # Example
/// ```
/// use alistui::logic::sorting::natural_cmp;
/// use std::cmp::Ordering;
/// assert_eq!(natural_cmp("file2.mp4", "file10.mp4"), Ordering::Less);
/// assert_eq!(natural_cmp("Movie", "movie"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ia = a.chars().peekable();
    let mut ib = b.chars().peekable();

    loop {
        match (ia.peek().copied(), ib.peek().copied()) {
            // Equal ignoring case and digit padding; raw compare keeps the
            // ordering total and deterministic
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let run_a = take_digit_run(&mut ia);
                    let run_b = take_digit_run(&mut ib);
                    let ord = compare_digit_runs(&run_a, &run_b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let la = lowercase_char(ca);
                    let lb = lowercase_char(cb);
                    if la != lb {
                        return la.cmp(&lb);
                    }
                    ia.next();
                    ib.next();
                }
            }
        }
    }
}

fn lowercase_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn take_digit_run(chars: &mut Peekable<Chars>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let sa = a.trim_start_matches('0');
    let sb = b.trim_start_matches('0');
    // Longer stripped run is the larger number; equal lengths compare
    // digit-by-digit; equal values order by padding ("1" before "01")
    sa.len()
        .cmp(&sb.len())
        .then_with(|| sa.cmp(sb))
        .then_with(|| a.len().cmp(&b.len()))
}

/// Parse a server-reported RFC 3339 timestamp into millis since the epoch
///
/// Missing or malformed timestamps collapse to 0 so they group together at
/// the start of an ascending sort.
pub fn modified_timestamp(modified: &str) -> i64 {
    if modified.is_empty() {
        return 0;
    }
    chrono::DateTime::parse_from_rfc3339(modified)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Compare two file entries according to the given sort key
///
/// # Sort Rules
/// - With `folders_first`, directories come before files regardless of the
///   chosen key or direction
/// - Name uses natural comparison; Size and Modified tie-break by name
/// - Descending reverses the comparison within each group
pub fn compare_entries(
    a: &FileEntry,
    b: &FileEntry,
    key: SortKey,
    order: SortOrder,
    folders_first: bool,
) -> Ordering {
    if folders_first && a.is_dir != b.is_dir {
        return if a.is_dir {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let result = match key {
        SortKey::Name => natural_cmp(&a.name, &b.name),
        SortKey::Size => a
            .size
            .cmp(&b.size)
            .then_with(|| natural_cmp(&a.name, &b.name)),
        SortKey::Modified => modified_timestamp(&a.modified)
            .cmp(&modified_timestamp(&b.modified))
            .then_with(|| natural_cmp(&a.name, &b.name)),
    };

    match order {
        SortOrder::Ascending => result,
        SortOrder::Descending => result.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            size: 0,
            is_dir: false,
            modified: String::new(),
            sign: String::new(),
            thumb: String::new(),
            file_type: 0,
        }
    }

    fn dir(name: &str) -> FileEntry {
        FileEntry {
            is_dir: true,
            ..file(name)
        }
    }

    fn sized(name: &str, size: u64) -> FileEntry {
        FileEntry {
            size,
            ..file(name)
        }
    }

    fn dated(name: &str, modified: &str) -> FileEntry {
        FileEntry {
            modified: modified.to_string(),
            ..file(name)
        }
    }

    #[test]
    fn test_natural_orders_digit_runs_numerically() {
        let mut names = vec!["file10.mp4", "file2.mp4", "file1.mp4"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["file1.mp4", "file2.mp4", "file10.mp4"]);
    }

    #[test]
    fn test_natural_is_case_insensitive() {
        let mut names = vec!["banana", "Apple", "cherry"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_natural_mixed_segments() {
        assert_eq!(natural_cmp("a2b9", "a2b10"), Ordering::Less);
        assert_eq!(natural_cmp("a10", "a9z"), Ordering::Greater);
    }

    #[test]
    fn test_natural_zero_padding_is_deterministic() {
        assert_eq!(natural_cmp("file01", "file1"), Ordering::Greater);
        assert_eq!(natural_cmp("file1", "file01"), Ordering::Less);
    }

    #[test]
    fn test_folders_first_survives_descending() {
        let d = dir("zeta");
        let f = file("alpha");
        let ord = compare_entries(&d, &f, SortKey::Name, SortOrder::Descending, true);
        assert_eq!(ord, Ordering::Less);
    }

    #[test]
    fn test_without_folders_first_entries_intermix() {
        let d = dir("zeta");
        let f = file("alpha");
        let ord = compare_entries(&d, &f, SortKey::Name, SortOrder::Ascending, false);
        assert_eq!(ord, Ordering::Greater);
    }

    #[test]
    fn test_size_sort_with_name_tiebreak() {
        let small = sized("b.bin", 10);
        let large = sized("a.bin", 2000);
        assert_eq!(
            compare_entries(&small, &large, SortKey::Size, SortOrder::Ascending, true),
            Ordering::Less
        );

        let same_a = sized("a.bin", 10);
        let same_b = sized("b.bin", 10);
        assert_eq!(
            compare_entries(&same_a, &same_b, SortKey::Size, SortOrder::Ascending, true),
            Ordering::Less
        );
    }

    #[test]
    fn test_modified_sort_parses_rfc3339() {
        let older = dated("new-name.txt", "2023-01-02T10:00:00Z");
        let newer = dated("aaa.txt", "2024-06-01T08:30:00+02:00");
        assert_eq!(
            compare_entries(&older, &newer, SortKey::Modified, SortOrder::Ascending, true),
            Ordering::Less
        );
        assert_eq!(
            compare_entries(&older, &newer, SortKey::Modified, SortOrder::Descending, true),
            Ordering::Greater
        );
    }

    #[test]
    fn test_missing_timestamp_sorts_as_epoch() {
        let missing = dated("x.txt", "");
        let dated_entry = dated("y.txt", "2020-01-01T00:00:00Z");
        assert_eq!(
            compare_entries(
                &missing,
                &dated_entry,
                SortKey::Modified,
                SortOrder::Ascending,
                true
            ),
            Ordering::Less
        );
    }
}
