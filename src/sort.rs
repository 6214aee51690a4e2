//! Defines the representation of the table's sorting state.
//!
//! A single column can be sorted at a time; clicking a header cycles that
//! column through `NotSorted -> Descending -> Ascending -> NotSorted`.

use std::fmt::Debug;

/// Represents the *interaction* state for sorting a specific column header in the UI.
///
/// Each variant carries the column name it refers to. The applied state is
/// stored in `TableContainer::sort`; header rendering compares it against a
/// per-column `NotSorted` default to draw the right icon.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SortState {
    /// Column is not part of the current sort criteria.
    NotSorted(String),
    /// Column sorted ascending.
    Ascending(String),
    /// Column sorted descending.
    Descending(String),
}

impl SortState {
    /// The column name this state refers to.
    pub fn column_name(&self) -> &str {
        match self {
            SortState::NotSorted(name)
            | SortState::Ascending(name)
            | SortState::Descending(name) => name,
        }
    }

    /// Whether this state applies sorting to the given column.
    pub fn is_sorted_column(&self, column_name: &str) -> bool {
        !matches!(self, SortState::NotSorted(_)) && self.column_name() == column_name
    }

    /// Calculates the next interaction state in the UI cycle for a header click.
    ///
    /// The cycle progresses as follows:
    /// 1. `NotSorted`  -> `Descending`
    /// 2. `Descending` -> `Ascending`
    /// 3. `Ascending`  -> `NotSorted` (removes the sort for this column)
    pub fn cycle_next(&self) -> Self {
        match self {
            SortState::NotSorted(name) => SortState::Descending(name.clone()),
            SortState::Descending(name) => SortState::Ascending(name.clone()),
            SortState::Ascending(name) => SortState::NotSorted(name.clone()),
        }
    }

    /// Returns a Unicode icon visually representing the interaction state.
    ///
    /// Used by the `ExtraInteractions::sort_button` implementation in
    /// `traits.rs` to display feedback in the table header.
    pub fn get_icon(&self) -> &'static str {
        match self {
            SortState::Descending(_) => "⏷", // U+23F7 (Down arrow)
            SortState::Ascending(_) => "⏶",  // U+23F6 (Up arrow)
            SortState::NotSorted(_) => "↕",  // U+2195 UP DOWN ARROW
        }
    }
}

#[cfg(test)]
mod tests_sort_state {
    use super::*;

    #[test]
    fn test_cycle() {
        let start = SortState::NotSorted("col".to_string());
        let descending = start.cycle_next();
        let ascending = descending.cycle_next();
        let back = ascending.cycle_next();

        assert_eq!(descending, SortState::Descending("col".to_string()));
        assert_eq!(ascending, SortState::Ascending("col".to_string()));
        assert_eq!(back, start);
    }

    #[test]
    fn test_is_sorted_column() {
        let sort = SortState::Ascending("b".to_string());
        assert!(sort.is_sorted_column("b"));
        assert!(!sort.is_sorted_column("a"));

        let unsorted = SortState::NotSorted("b".to_string());
        assert!(!unsorted.is_sorted_column("b"));
    }
}
