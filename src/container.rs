use egui::{Align, Color32, CornerRadius, Layout, TextStyle, Ui};
use egui_extras::{Column, TableBuilder, TableRow};
use std::{path::PathBuf, sync::Arc};
use tokio::task::spawn_blocking;

use crate::{CsvViewResult, ExtraInteractions, RowFilter, SortState, TableData, loader};

// --- Constants ---

/// Fixed initial display width of every table column (not content-derived).
pub const COLUMN_WIDTH: f32 = 100.0;

/// Background fill for rows hidden by the keyword filter.
const HIDDEN_ROW_FILL: Color32 = Color32::from_gray(90);

/// Identifies one cell of the loaded table.
///
/// `row` is the *original* zero-based row index (sorting only permutes the
/// display order, never the identities), `column` the positional column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

/// What `render_table` reports back to the shell for this frame.
#[derive(Debug, Default)]
pub struct TableResponse {
    /// New sort state if a header button was clicked this frame.
    pub sort: Option<Arc<SortState>>,
    /// The cell currently under the pointer, if any.
    pub hovered: Option<CellRef>,
}

/// Contains the loaded table, its source path and the applied sort.
///
/// Provides methods for loading, sorting, and displaying data in an egui table.
#[derive(Debug, Clone)]
pub struct TableContainer {
    /// The display-ready table, wrapped in an Arc for shared ownership.
    pub table: Arc<TableData>,
    /// Path of the loaded CSV file.
    pub path: Arc<PathBuf>,
    /// Applied sort state (column + direction), if any.
    pub sort: Option<Arc<SortState>>,
    /// Permutation mapping display position to original row index.
    /// Identity when unsorted. Always `table.height()` entries.
    row_order: Arc<Vec<usize>>,
}

impl TableContainer {
    /// Creates a container over an already materialized table, in original row order.
    pub fn new(table: TableData, path: PathBuf) -> Self {
        let row_order: Vec<usize> = (0..table.height()).collect();

        TableContainer {
            table: Arc::new(table),
            path: Arc::new(path),
            sort: None,
            row_order: Arc::new(row_order),
        }
    }

    /// Loads a CSV file into a fresh `TableContainer`.
    ///
    /// Load is all-or-nothing per file: on success the result fully replaces
    /// any previously displayed container; on failure the caller clears the
    /// display and surfaces the error.
    pub async fn load(path: PathBuf) -> CsvViewResult<Self> {
        tracing::debug!("fn load()\npath: {path:#?}");

        let table = loader::load_table(&path).await?;

        tracing::info!(
            "Loaded '{}': {} rows x {} columns",
            path.display(),
            table.height(),
            table.width()
        );

        Ok(Self::new(table, path))
    }

    /// Applies a sort state, producing a new container with an updated permutation.
    ///
    /// The rows themselves are never mutated; sorting is a stable
    /// lexicographic sort of the row-index permutation by the target column,
    /// so rows with equal keys keep their original relative order.
    pub async fn sort(self, sort: Option<Arc<SortState>>) -> CsvViewResult<Self> {
        // Determine column name and sort order from the SortState.
        let (column_name, ascending) = match sort.as_deref() {
            Some(SortState::Ascending(name)) => (name.clone(), true),
            Some(SortState::Descending(name)) => (name.clone(), false),
            // Cycled back to unsorted (or cleared): restore the original order.
            Some(SortState::NotSorted(_)) | None => {
                let row_order: Vec<usize> = (0..self.table.height()).collect();
                return Ok(TableContainer {
                    sort: None,
                    row_order: Arc::new(row_order),
                    ..self
                });
            }
        };

        tracing::debug!("fn sort()\ncolumn_name: {column_name}\nascending: {ascending}");

        let table = Arc::clone(&self.table);

        // Sorting large tables is CPU work; keep it off the UI thread.
        let row_order = spawn_blocking(move || {
            let mut order: Vec<usize> = (0..table.height()).collect();

            if let Some(col) = table.columns.iter().position(|name| name == &column_name) {
                order.sort_by(|&a, &b| {
                    let ordering = table.rows[a][col].cmp(&table.rows[b][col]);
                    if ascending { ordering } else { ordering.reverse() }
                });
            }

            order
        })
        .await?;

        Ok(TableContainer {
            sort,
            row_order: Arc::new(row_order),
            ..self
        })
    }

    /// Positional cell lookup, guarded against out-of-range indices.
    ///
    /// Used by the tooltip path; lookup is by column *index*, not header
    /// label, so duplicated or blank headers cannot misresolve a value.
    pub fn cell_value(&self, cell: &CellRef) -> Option<&str> {
        self.table
            .rows
            .get(cell.row)
            .and_then(|row| row.get(cell.column))
            .map(String::as_str)
    }

    /// Renders the table as an `egui` table.
    ///
    /// ### Arguments
    /// * `ui`: the `egui::Ui` where the table will be rendered.
    /// * `filter`: the active keyword filter; hidden rows get a gray background.
    ///
    /// ### Returns
    /// A `TableResponse` with the new sort state (if a header was clicked)
    /// and the hovered cell (if any) for the tooltip controller.
    pub fn render_table(&self, ui: &mut Ui, filter: &RowFilter) -> TableResponse {
        let mut sorted_column = self.sort.clone();
        let mut sort_changed = false;
        let mut hovered: Option<CellRef> = None;

        // Header rendering closure: creates sort buttons for each column.
        let analyze_header = |mut table_row: TableRow<'_, '_>| {
            for column_name in &self.table.columns {
                table_row.col(|ui| {
                    // Determine current sort state of the column (Ascending, Descending, or NotSorted).
                    let sort_state = match &self.sort {
                        Some(sort) if sort.is_sorted_column(column_name) => sort.clone(),
                        _ => Arc::new(SortState::NotSorted(column_name.clone())),
                    };

                    ui.horizontal_centered(|ui| {
                        // The `sort_button` method is provided by the `ExtraInteractions` trait.
                        if ui.sort_button(&mut sorted_column, sort_state).clicked() {
                            sort_changed = true;
                        }
                    });
                });
            }
        };

        // Rows rendering closure: displays the data for each displayed row.
        let analyze_rows = |mut table_row: TableRow<'_, '_>| {
            let display_index = table_row.index();
            // Resolve the original row through the sort permutation.
            let original_index = self.row_order[display_index];
            let cells = &self.table.rows[original_index];

            let visible = !filter.is_active() || filter.row_visible(cells);

            for (column_index, value) in cells.iter().enumerate() {
                table_row.col(|ui| {
                    if !visible {
                        // Hidden rows keep their place; only the background changes.
                        ui.painter()
                            .rect_filled(ui.max_rect(), CornerRadius::ZERO, HIDDEN_ROW_FILL);
                    }

                    // Disable text wrapping so each cell stays on one line.
                    ui.with_layout(
                        Layout::left_to_right(Align::Center).with_main_wrap(false),
                        |ui| {
                            let response = ui.label(value);
                            if response.hovered() {
                                hovered = Some(CellRef {
                                    row: original_index,
                                    column: column_index,
                                });
                            }
                        },
                    );
                });
            }
        };

        let style = ui.style();
        let text_height = TextStyle::Body.resolve(style).size;
        let header_height = style.spacing.interact_size.y + 2.0 * style.spacing.item_spacing.y;

        // Every column gets the same fixed initial width; the user can resize.
        let column = Column::initial(COLUMN_WIDTH)
            .at_least(COLUMN_WIDTH / 4.0)
            .resizable(true)
            .clip(true);

        // Build and display the table using `egui_extras::TableBuilder`.
        TableBuilder::new(ui)
            .striped(true) // Alternate row background colors for better readability.
            .columns(column, self.table.width()) // Set up the columns.
            .column(Column::remainder()) // Add the remainder
            .auto_shrink([false, false]) // Disable auto-shrinking to fit content.
            .header(header_height, analyze_header) // Render the table header.
            .body(|body| {
                let num_rows = self.table.height();
                body.rows(text_height, num_rows, analyze_rows); // Render the table rows.
            });

        TableResponse {
            sort: if sort_changed { sorted_column } else { None },
            hovered,
        }
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_container
#[cfg(test)]
mod tests_container {
    use super::*;
    use crate::CsvViewResult;
    use std::io::Write;
    use tempfile::Builder;

    fn test_table() -> TableData {
        TableData {
            columns: vec!["name".to_string(), "count".to_string()],
            rows: vec![
                vec!["beta".to_string(), "2".to_string()],
                vec!["alpha".to_string(), "1".to_string()],
                vec!["beta".to_string(), "3".to_string()],
                vec!["NULL".to_string(), "4".to_string()],
            ],
        }
    }

    fn displayed_rows(container: &TableContainer) -> Vec<&Vec<String>> {
        container
            .row_order
            .iter()
            .map(|&original| &container.table.rows[original])
            .collect()
    }

    #[tokio::test]
    async fn test_sort_ascending_is_stable() -> CsvViewResult<()> {
        let container = TableContainer::new(test_table(), PathBuf::from("test.csv"));
        let sort = Some(Arc::new(SortState::Ascending("name".to_string())));

        let sorted = container.sort(sort).await?;

        // "NULL" < "alpha" < "beta" lexicographically; the two "beta" rows
        // keep their original relative order.
        assert_eq!(*sorted.row_order, vec![3, 1, 0, 2]);
        assert_eq!(displayed_rows(&sorted)[0], &vec!["NULL", "4"]);

        // The underlying rows were not touched.
        assert_eq!(sorted.table.rows[0], vec!["beta", "2"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_sort_descending_is_stable() -> CsvViewResult<()> {
        let container = TableContainer::new(test_table(), PathBuf::from("test.csv"));
        let sort = Some(Arc::new(SortState::Descending("name".to_string())));

        let sorted = container.sort(sort).await?;

        assert_eq!(*sorted.row_order, vec![0, 2, 1, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn test_sort_not_sorted_restores_original_order() -> CsvViewResult<()> {
        let container = TableContainer::new(test_table(), PathBuf::from("test.csv"));

        let sorted = container
            .sort(Some(Arc::new(SortState::Ascending("name".to_string()))))
            .await?;
        let restored = sorted
            .sort(Some(Arc::new(SortState::NotSorted("name".to_string()))))
            .await?;

        assert_eq!(*restored.row_order, vec![0, 1, 2, 3]);
        assert!(restored.sort.is_none());
        Ok(())
    }

    #[test]
    fn test_cell_value_guarded() {
        let container = TableContainer::new(test_table(), PathBuf::from("test.csv"));

        assert_eq!(
            container.cell_value(&CellRef { row: 1, column: 0 }),
            Some("alpha")
        );
        assert_eq!(container.cell_value(&CellRef { row: 99, column: 0 }), None);
        assert_eq!(container.cell_value(&CellRef { row: 0, column: 99 }), None);
    }

    #[tokio::test]
    async fn test_second_load_fully_replaces_first() -> CsvViewResult<()> {
        let mut first = Builder::new().suffix(".csv").tempfile()?;
        first.write_all(b"a,b\n1,2\n3,4")?;
        first.flush()?;

        let mut second = Builder::new().suffix(".csv").tempfile()?;
        second.write_all(b"x\nonly")?;
        second.flush()?;

        let container_one = TableContainer::load(first.path().to_path_buf()).await?;
        assert_eq!(container_one.table.height(), 2);

        // Loading the second file builds a fresh container: zero leftover
        // rows from the prior table.
        let container_two = TableContainer::load(second.path().to_path_buf()).await?;
        assert_eq!(container_two.table.columns, vec!["x"]);
        assert_eq!(container_two.table.height(), 1);
        assert_eq!(container_two.table.rows[0], vec!["only"]);

        Ok(())
    }
}
