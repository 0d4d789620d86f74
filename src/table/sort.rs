//! Column sorting for listing tables.
//!
//! Sorting is a pure function of the rows, the requested column and the state
//! left behind by the previous call. The caller owns the [`SortState`] and
//! threads it from one call to the next, which gives the familiar "click the
//! same header again to reverse" behaviour.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use super::{Row, MODIFIED_COLUMN, NAME_COLUMN, SIZE_COLUMN};
use crate::datetime::timestamp_millis_or_zero;

/// Name-column text of the row that always floats to the top.
pub const PARENT_DIRECTORY_LABEL: &str = "Parent Directory";

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which column was sorted last, and in which direction.
///
/// The default value is the "never sorted" state of a freshly loaded listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub last_column: Option<usize>,
    pub last_order: Option<SortOrder>,
}

impl SortState {
    /// Direction the next sort of `column` will use.
    pub fn next_order(&self, column: usize) -> SortOrder {
        let ascending = match self.last_column {
            Some(last) if last == column => self.last_order != Some(SortOrder::Asc),
            _ => default_ascending(column),
        };
        SortOrder::from_ascending(ascending)
    }
}

/// Result of one sort: the display order and the state for the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// Indices into the input rows, in display order.
    pub order: Vec<usize>,
    pub state: SortState,
}

impl SortOutcome {
    /// Reorder `items` (parallel to the sorted rows) into display order.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        self.order
            .iter()
            .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
            .collect()
    }
}

/// Comparison key extracted from one cell.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    /// Lowercased text as UTF-16 code units, matching browser string ordering.
    Text(Vec<u16>),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Name sorts A→Z first; size and last-modified sort largest/newest first.
fn default_ascending(column: usize) -> bool {
    !matches!(column, SIZE_COLUMN | MODIFIED_COLUMN)
}

fn sort_key(row: &Row, column: usize) -> SortKey {
    let text = row.text(column).to_lowercase();
    match column {
        SIZE_COLUMN => SortKey::Number(
            parse_float_prefix(&text)
                .filter(|v| !v.is_nan())
                .unwrap_or(0.0),
        ),
        MODIFIED_COLUMN => {
            let source = row
                .cell(column)
                .and_then(|c| c.timestamp.as_deref())
                .filter(|t| !t.is_empty())
                .unwrap_or(&text);
            SortKey::Number(timestamp_millis_or_zero(source))
        }
        _ => SortKey::Text(text.encode_utf16().collect()),
    }
}

/// Parse the longest leading decimal number in `s`, the way `parseFloat` does.
///
/// Leading whitespace is skipped and trailing garbage (`"10 KB"`) is ignored.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Sort `rows` by `column`, toggling direction when the same column is
/// sorted twice in a row.
///
/// Never fails: missing cells sort as `""`, unparseable sizes and dates sort
/// as `0`. After sorting, the first row named [`PARENT_DIRECTORY_LABEL`] is
/// moved to the front.
pub fn sort_table(rows: &[Row], column: usize, previous: &SortState) -> SortOutcome {
    let order_dir = previous.next_order(column);
    let ascending = order_dir == SortOrder::Asc;

    let keys: Vec<SortKey> = rows.iter().map(|row| sort_key(row, column)).collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = keys[a].compare(&keys[b]);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    if let Some(pos) = order
        .iter()
        .position(|&i| rows[i].text(NAME_COLUMN) == PARENT_DIRECTORY_LABEL)
    {
        let pinned = order.remove(pos);
        order.insert(0, pinned);
    }

    debug!(column, order = %order_dir, rows = rows.len(), "sorted table");

    SortOutcome {
        order,
        state: SortState {
            last_column: Some(column),
            last_order: Some(order_dir),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn named(name: &str) -> Row {
        Row::from_texts(["", name, "", ""])
    }

    fn sized(name: &str, size: &str) -> Row {
        Row::from_texts(["", name, size, ""])
    }

    fn dated(name: &str, timestamp: &str) -> Row {
        Row::new(vec![
            Cell::new(""),
            Cell::new(name),
            Cell::new(""),
            Cell::new("").with_timestamp(timestamp),
        ])
    }

    fn names(rows: &[Row], outcome: &SortOutcome) -> Vec<String> {
        outcome
            .order
            .iter()
            .map(|&i| rows[i].text(NAME_COLUMN).to_string())
            .collect()
    }

    #[test]
    fn test_default_directions() {
        let state = SortState::default();
        assert_eq!(state.next_order(NAME_COLUMN), SortOrder::Asc);
        assert_eq!(state.next_order(SIZE_COLUMN), SortOrder::Desc);
        assert_eq!(state.next_order(MODIFIED_COLUMN), SortOrder::Desc);
        assert_eq!(state.next_order(0), SortOrder::Asc);
        assert_eq!(state.next_order(7), SortOrder::Asc);
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let rows = vec![named("beta"), named("Alpha"), named("gamma")];
        let outcome = sort_table(&rows, NAME_COLUMN, &SortState::default());

        assert_eq!(names(&rows, &outcome), vec!["Alpha", "beta", "gamma"]);
        assert_eq!(outcome.state.last_column, Some(NAME_COLUMN));
        assert_eq!(outcome.state.last_order, Some(SortOrder::Asc));
    }

    #[test]
    fn test_same_column_toggles() {
        let rows = vec![named("b"), named("a"), named("c")];
        let first = sort_table(&rows, NAME_COLUMN, &SortState::default());
        let second = sort_table(&rows, NAME_COLUMN, &first.state);
        let third = sort_table(&rows, NAME_COLUMN, &second.state);

        assert_eq!(names(&rows, &first), vec!["a", "b", "c"]);
        assert_eq!(names(&rows, &second), vec!["c", "b", "a"]);
        assert_eq!(second.state.last_order, Some(SortOrder::Desc));
        assert_eq!(names(&rows, &third), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_switching_column_uses_default() {
        let rows = vec![sized("a", "1"), sized("b", "3"), sized("c", "2")];
        let by_name = sort_table(&rows, NAME_COLUMN, &SortState::default());
        let by_name_again = sort_table(&rows, NAME_COLUMN, &by_name.state);
        assert_eq!(by_name_again.state.last_order, Some(SortOrder::Desc));

        // Switching to size ignores the name column's direction.
        let by_size = sort_table(&rows, SIZE_COLUMN, &by_name_again.state);
        assert_eq!(by_size.state.last_order, Some(SortOrder::Desc));
        assert_eq!(names(&rows, &by_size), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_size_non_numeric_is_zero() {
        let rows = vec![
            sized("ten", "10 KB"),
            sized("nan", "not a number"),
            sized("two", "2 KB"),
        ];

        let first = sort_table(&rows, SIZE_COLUMN, &SortState::default());
        assert_eq!(first.state.last_order, Some(SortOrder::Desc));
        assert_eq!(names(&rows, &first), vec!["ten", "two", "nan"]);

        let second = sort_table(&rows, SIZE_COLUMN, &first.state);
        assert_eq!(second.state.last_order, Some(SortOrder::Asc));
        assert_eq!(names(&rows, &second), vec!["nan", "two", "ten"]);
    }

    #[test]
    fn test_size_ignores_units() {
        // "1.00MB" parses as 1 and sorts below "500.00KB".
        let rows = vec![sized("big", "1.00MB"), sized("small", "500.00KB")];
        let outcome = sort_table(&rows, SIZE_COLUMN, &SortState::default());
        assert_eq!(names(&rows, &outcome), vec!["small", "big"]);
    }

    #[test]
    fn test_modified_prefers_timestamp() {
        let rows = vec![
            Row::from_texts(["", "Parent Directory", "", ""]),
            dated("b.txt", "2023-01-01T00:00:00Z"),
            dated("a.txt", "2024-01-01T00:00:00Z"),
        ];
        let outcome = sort_table(&rows, MODIFIED_COLUMN, &SortState::default());
        assert_eq!(
            names(&rows, &outcome),
            vec!["Parent Directory", "a.txt", "b.txt"]
        );
    }

    #[test]
    fn test_modified_falls_back_to_text() {
        let rows = vec![
            Row::from_texts(["", "old", "", "2001-05-01"]),
            Row::from_texts(["", "new", "", "2020-05-01"]),
        ];
        let outcome = sort_table(&rows, MODIFIED_COLUMN, &SortState::default());
        assert_eq!(names(&rows, &outcome), vec!["new", "old"]);
    }

    #[test]
    fn test_modified_falls_back_to_rendered_text() {
        let rows = vec![
            Row::from_texts(["", "old", "", "1/2/2020, 3:04:05 PM"]),
            Row::from_texts(["", "new", "", "1/2/2024, 3:04:05 PM"]),
            Row::from_texts(["", "morning", "", "1/2/2024, 9:00:00 AM"]),
        ];
        let outcome = sort_table(&rows, MODIFIED_COLUMN, &SortState::default());
        assert_eq!(names(&rows, &outcome), vec!["new", "morning", "old"]);
    }

    #[test]
    fn test_empty_timestamp_uses_text() {
        let rows = vec![
            Row::new(vec![
                Cell::default(),
                Cell::new("old"),
                Cell::default(),
                Cell::new("2001-05-01").with_timestamp(""),
            ]),
            Row::new(vec![
                Cell::default(),
                Cell::new("new"),
                Cell::default(),
                Cell::new("2020-05-01").with_timestamp(""),
            ]),
        ];
        let outcome = sort_table(&rows, MODIFIED_COLUMN, &SortState::default());
        assert_eq!(names(&rows, &outcome), vec!["new", "old"]);
    }

    #[test]
    fn test_unparseable_date_is_earliest() {
        let rows = vec![
            dated("valid", "1999-12-31T23:59:59Z"),
            dated("garbage", "yesterday-ish"),
            Row::from_texts(["", "missing"]),
        ];

        let desc = sort_table(&rows, MODIFIED_COLUMN, &SortState::default());
        assert_eq!(names(&rows, &desc)[0], "valid");

        let asc = sort_table(&rows, MODIFIED_COLUMN, &desc.state);
        assert_eq!(names(&rows, &asc)[2], "valid");
    }

    #[test]
    fn test_parent_directory_pinned_for_every_column_and_direction() {
        let rows = vec![
            Row::new(vec![
                Cell::new("z-icon"),
                Cell::new("Parent Directory"),
                Cell::new(""),
                Cell::new(""),
            ]),
            sized("zeta", "900"),
            dated("alpha", "2030-01-01T00:00:00Z"),
        ];

        for column in 0..5 {
            let first = sort_table(&rows, column, &SortState::default());
            let second = sort_table(&rows, column, &first.state);
            for outcome in [&first, &second] {
                assert_eq!(
                    rows[outcome.order[0]].text(NAME_COLUMN),
                    PARENT_DIRECTORY_LABEL,
                    "column {column}"
                );
            }
        }
    }

    #[test]
    fn test_parent_directory_match_is_exact() {
        let rows = vec![named("aaa"), named("parent directory")];
        let outcome = sort_table(&rows, NAME_COLUMN, &SortState::default());
        assert_eq!(names(&rows, &outcome), vec!["aaa", "parent directory"]);
    }

    #[test]
    fn test_only_first_parent_row_is_pinned() {
        let rows = vec![
            named("Parent Directory"),
            named("a"),
            named("Parent Directory"),
        ];
        let outcome = sort_table(&rows, NAME_COLUMN, &SortState::default());
        let sorted = names(&rows, &outcome);
        assert_eq!(sorted, vec!["Parent Directory", "a", "Parent Directory"]);
    }

    #[test]
    fn test_missing_cells_sort_as_empty() {
        let rows = vec![named("b"), Row::default(), named("a")];
        let outcome = sort_table(&rows, NAME_COLUMN, &SortState::default());
        assert_eq!(outcome.order, vec![1, 2, 0]);
    }

    #[test]
    fn test_empty_rows() {
        let outcome = sort_table(&[], SIZE_COLUMN, &SortState::default());
        assert!(outcome.order.is_empty());
        assert_eq!(outcome.state.last_column, Some(SIZE_COLUMN));
    }

    #[test]
    fn test_apply_outcome() {
        let rows = vec![named("b"), named("c"), named("a")];
        let outcome = sort_table(&rows, NAME_COLUMN, &SortState::default());
        let sorted = outcome.apply(vec!['b', 'c', 'a']);
        assert_eq!(sorted, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("10 kb"), Some(10.0));
        assert_eq!(parse_float_prefix("  2.50mb"), Some(2.5));
        assert_eq!(parse_float_prefix("-3"), Some(-3.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("infinity"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_sort_order_display() {
        assert_eq!(SortOrder::Asc.to_string(), "asc");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }
}
