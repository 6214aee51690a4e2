use egui::{TextEdit, Ui};

/// Keyword filter over the displayed rows.
///
/// The free-text input is lowercased and split on whitespace into keyword
/// tokens. A row is *visible* iff every keyword is a case-insensitive
/// substring of at least one of that row's cell values (logical AND across
/// keywords, logical OR across cells per keyword).
///
/// Visibility is purely presentational: hidden rows keep their place in the
/// table and only get a different background fill. An empty input means
/// every row trivially satisfies "all of zero keywords".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    /// The raw filter text, bound to the text edit widget.
    pub input: String,
    /// Lowercased keyword tokens derived from `input`.
    keywords: Vec<String>,
}

impl RowFilter {
    /// Creates a filter from free-text input.
    pub fn new(input: &str) -> Self {
        let mut filter = RowFilter {
            input: input.to_string(),
            keywords: Vec::new(),
        };
        filter.update_keywords();
        filter
    }

    /// Recomputes the keyword tokens after `input` changed.
    fn update_keywords(&mut self) {
        self.keywords = self
            .input
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
    }

    /// Whether any keywords are active.
    pub fn is_active(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Decides visibility for one row of stringified cell values.
    pub fn row_visible(&self, cells: &[String]) -> bool {
        self.keywords.iter().all(|keyword| {
            cells
                .iter()
                .any(|cell| cell.to_lowercase().contains(keyword))
        })
    }

    /// Renders the single-line filter input.
    ///
    /// Returns `true` if the text changed this frame (the keyword tokens are
    /// recomputed before returning).
    pub fn render_filter(&mut self, ui: &mut Ui) -> bool {
        ui.label("Filter:");

        let response = ui
            .add(TextEdit::singleline(&mut self.input).desired_width(200.0))
            .on_hover_text(
                "Whitespace-separated keywords.\n\
                A row stays highlighted when every keyword matches some cell\n\
                (case-insensitive substring match).",
            );

        if response.changed() {
            self.update_keywords();
            true
        } else {
            false
        }
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_row_filter
#[cfg(test)]
mod tests_row_filter {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_every_keyword_must_match_some_cell() {
        let filter = RowFilter::new("a 1");

        // "a1" contains "a" and "1".
        assert!(filter.row_visible(&row(&["a1", "x"])));
        // "a" present but no cell contains "1".
        assert!(!filter.row_visible(&row(&["b2", "a"])));
        // No cell contains "a".
        assert!(!filter.row_visible(&row(&["zz", "11"])));
    }

    #[test]
    fn test_empty_input_keeps_all_rows_visible() {
        let filter = RowFilter::new("");

        assert!(!filter.is_active());
        assert!(filter.row_visible(&row(&["anything"])));
        assert!(filter.row_visible(&row(&[])));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let filter = RowFilter::new("ALPHA");

        assert!(filter.row_visible(&row(&["some alpha value", "x"])));
        assert!(filter.row_visible(&row(&["ALPHAnumeric"])));
        assert!(!filter.row_visible(&row(&["beta"])));
    }

    #[test]
    fn test_whitespace_splits_keywords() {
        let filter = RowFilter::new("  foo \t bar  ");

        assert!(filter.is_active());
        assert!(filter.row_visible(&row(&["foobar"])));
        assert!(filter.row_visible(&row(&["foo", "bar"])));
        assert!(!filter.row_visible(&row(&["foo only"])));
    }
}
