//! Column sorting over rendered table rows.
//!
//! Sorting works on the display text of a cell, not on the typed value behind
//! it: `"1,234"` sorts as a number because it looks like one once the
//! separators are stripped.
//!
//! The numeric check is made for each compared pair. A column that mixes
//! numeric and non-numeric text can therefore compare some pairs as numbers
//! and others as text, which is not a total order. This matches how the
//! dashboard has always sorted and is kept on purpose. The merge sort in
//! `helpers::sort_with_order` tolerates such comparators, so a mixed column
//! still sorts to some permutation of its rows.
//!
//! Text collation folds case and the accents of Latin-1 and Latin
//! Extended-A letters (`Élan` sorts with `Elan`). Other scripts, ligatures
//! such as `æ` and `ß`, and punctuation still compare by code point.

use crate::helpers::{compare_floats, sort_with_order};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static NUMERIC_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric cell pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Asc
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Last sorted column and direction, owned by a single table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Same column toggles; a new column (or the first sort) starts ascending
    pub fn advance(&mut self, column: usize) -> SortDirection {
        self.direction = if self.column == Some(column) {
            self.direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.column = Some(column);
        self.direction
    }

    /// Direction currently shown for `column`, if it is the sorted one
    pub fn direction_for(&self, column: usize) -> Option<SortDirection> {
        (self.column == Some(column)).then_some(self.direction)
    }
}

/// A rendered row whose cells can be read back as text
pub trait SortableRow {
    fn cell(&self, column: usize) -> &str;
}

impl SortableRow for Vec<String> {
    fn cell(&self, column: usize) -> &str {
        self.get(column).map(String::as_str).unwrap_or("")
    }
}

/// One rendered table row plus the client it drills into, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub key: Option<String>,
}

impl TableRow {
    pub fn with_key(cells: Vec<String>, key: &str) -> Self {
        Self {
            cells,
            key: Some(key.to_string()),
        }
    }
}

impl SortableRow for TableRow {
    fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// A rendered row carried alongside the record it was built from
impl<T> SortableRow for (TableRow, T) {
    fn cell(&self, column: usize) -> &str {
        self.0.cell(column)
    }
}

/// Sort `rows` by `column`, advancing `state`.
///
/// Returns the new direction, or `None` when there was nothing to sort; in
/// that case `state` is left as it was.
pub fn sort_rows<R: SortableRow>(
    rows: &mut [R],
    column: usize,
    state: &mut SortState,
) -> Option<SortDirection> {
    if rows.is_empty() {
        return None;
    }

    let direction = state.advance(column);
    sort_with_order(
        rows,
        |a, b| compare_cells(a.cell(column), b.cell(column)),
        direction.is_ascending(),
    );
    Some(direction)
}

/// Compare two cell texts: numerically when both look numeric, otherwise
/// with case-insensitive natural ordering.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    let a = normalize_cell(a);
    let b = normalize_cell(b);

    if let (Some(x), Some(y)) = (parse_numeric(&a), parse_numeric(&b)) {
        return compare_floats(x, y);
    }

    natural_cmp(&a, &b)
}

fn normalize_cell(text: &str) -> String {
    text.replace(',', "").trim().to_string()
}

fn parse_numeric(text: &str) -> Option<f64> {
    if !NUMERIC_CELL.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Case- and accent-insensitive comparison where digit runs compare by magnitude
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let lhs = take_digits(&mut left);
                let rhs = take_digits(&mut right);
                let ord = compare_digit_runs(&lhs, &rhs);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                let ord = fold_case(x).cmp(&fold_case(y));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold_case(c: char) -> char {
    fold_accent(c.to_lowercase().next().unwrap_or(c))
}

/// Base letter for accented lowercase Latin letters
fn fold_accent(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ð' | 'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(rows: &[Vec<String>], idx: usize) -> Vec<String> {
        rows.iter().map(|r| r.cell(idx).to_string()).collect()
    }

    fn rows(values: &[&str]) -> Vec<Vec<String>> {
        values.iter().map(|v| vec![v.to_string()]).collect()
    }

    #[test]
    fn test_numeric_not_lexical() {
        let mut table = rows(&["10", "9", "100"]);
        let mut state = SortState::default();
        assert_eq!(sort_rows(&mut table, 0, &mut state), Some(SortDirection::Asc));
        assert_eq!(column(&table, 0), vec!["9", "10", "100"]);
    }

    #[test]
    fn test_thousands_separators_are_numeric() {
        let mut table = rows(&["1,234", "987", "-5", "12.5"]);
        let mut state = SortState::default();
        sort_rows(&mut table, 0, &mut state);
        assert_eq!(column(&table, 0), vec!["-5", "12.5", "987", "1,234"]);
    }

    #[test]
    fn test_same_column_toggles() {
        let mut table = rows(&["b", "a", "c"]);
        let mut state = SortState::default();
        sort_rows(&mut table, 0, &mut state);
        assert_eq!(column(&table, 0), vec!["a", "b", "c"]);
        assert_eq!(sort_rows(&mut table, 0, &mut state), Some(SortDirection::Desc));
        assert_eq!(column(&table, 0), vec!["c", "b", "a"]);
        assert_eq!(sort_rows(&mut table, 0, &mut state), Some(SortDirection::Asc));
        assert_eq!(column(&table, 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_new_column_resets_to_ascending() {
        let mut table = vec![
            vec!["b".to_string(), "2".to_string()],
            vec!["a".to_string(), "10".to_string()],
            vec!["c".to_string(), "1".to_string()],
        ];
        let mut state = SortState::default();
        sort_rows(&mut table, 0, &mut state);
        sort_rows(&mut table, 0, &mut state);
        assert_eq!(state.direction, SortDirection::Desc);

        assert_eq!(sort_rows(&mut table, 1, &mut state), Some(SortDirection::Asc));
        assert_eq!(column(&table, 1), vec!["1", "2", "10"]);
        assert_eq!(state.column, Some(1));
    }

    #[test]
    fn test_empty_rows_leave_state_alone() {
        let mut table: Vec<Vec<String>> = Vec::new();
        let mut state = SortState {
            column: Some(2),
            direction: SortDirection::Desc,
        };
        assert_eq!(sort_rows(&mut table, 0, &mut state), None);
        assert_eq!(
            state,
            SortState {
                column: Some(2),
                direction: SortDirection::Desc
            }
        );
    }

    #[test]
    fn test_sort_is_permutation_and_idempotent() {
        let original = rows(&["Item 10", "item 9", "Alpha", "42", "beta", "Item 9"]);
        let mut once = original.clone();
        let mut state = SortState::default();
        sort_rows(&mut once, 0, &mut state);

        let mut before = original.clone();
        let mut after = once.clone();
        before.sort();
        after.sort();
        assert_eq!(before, after);

        let mut twice = once.clone();
        let mut fresh = SortState::default();
        sort_rows(&mut twice, 0, &mut fresh);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_natural_collation() {
        assert_eq!(natural_cmp("Item 9", "Item 10"), Ordering::Less);
        assert_eq!(natural_cmp("item 9", "ITEM 9"), Ordering::Equal);
        assert_eq!(natural_cmp("Alliant", "amstar"), Ordering::Less);
        assert_eq!(natural_cmp("PC-007", "PC-7"), Ordering::Equal);
        assert_eq!(natural_cmp("abc", "abcd"), Ordering::Less);
    }

    #[test]
    fn test_accents_fold_to_base_letter() {
        assert_eq!(natural_cmp("Élan", "Zeta"), Ordering::Less);
        assert_eq!(natural_cmp("élan", "ELAN"), Ordering::Equal);
        assert_eq!(natural_cmp("Łódź 2", "lodz 10"), Ordering::Less);

        let mut table = rows(&["Zeta", "Élan", "Beta"]);
        let mut state = SortState::default();
        sort_rows(&mut table, 0, &mut state);
        assert_eq!(column(&table, 0), vec!["Beta", "Élan", "Zeta"]);
    }

    #[test]
    fn test_mixed_column_sorts_without_panicking() {
        const VALUES: [&str; 12] = [
            "1.5", "1.10", "1.7x", "-5", "-3", "-4x", "10", "9", "PC-7", "n/a", "2.25", "2.3b",
        ];
        assert_eq!(compare_cells("1.10", "1.5"), Ordering::Less);
        assert_eq!(compare_cells("1.5", "1.7x"), Ordering::Less);
        assert_eq!(compare_cells("1.7x", "1.10"), Ordering::Less);

        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for _ in 0..200 {
            let mut table: Vec<Vec<String>> = (0..64)
                .map(|_| {
                    seed = seed
                        .wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(1_442_695_040_888_963_407);
                    vec![VALUES[(seed >> 33) as usize % VALUES.len()].to_string()]
                })
                .collect();
            let mut expected = table.clone();
            expected.sort();

            let mut state = SortState::default();
            assert_eq!(sort_rows(&mut table, 0, &mut state), Some(SortDirection::Asc));
            assert_eq!(sort_rows(&mut table, 0, &mut state), Some(SortDirection::Desc));

            table.sort();
            assert_eq!(table, expected);
        }
    }

    #[test]
    fn test_mixed_pair_falls_back_to_text() {
        assert_eq!(compare_cells("12", "n/a"), Ordering::Less);
        assert_eq!(compare_cells(" 7 ", "7"), Ordering::Equal);
        assert_eq!(compare_cells("1.5.2", "1.10.0"), Ordering::Less);
    }

    #[test]
    fn test_missing_cell_sorts_as_empty() {
        let mut table = vec![
            TableRow {
                cells: vec!["x".to_string(), "b".to_string()],
                key: None,
            },
            TableRow {
                cells: vec!["y".to_string()],
                key: None,
            },
        ];
        let mut state = SortState::default();
        sort_rows(&mut table, 1, &mut state);
        assert_eq!(table[0].cells, vec!["y".to_string()]);
    }
}
