use crate::{CsvViewError, CsvViewResult, FileExtension};

use polars::prelude::*;
use std::{fmt::Debug, path::Path};
use tokio::task::spawn_blocking;

// --- Constants ---

/// Literal marker substituted for missing/NA cell values at load time.
///
/// The substitution is one-way and display-only: after loading there is no
/// distinction left between "was empty" and "was NA".
pub static NULL_MARKER: &str = "NULL";

/// Values treated as null/missing during CSV parsing, in addition to
/// missing fields. Matches the usual pandas-style token set.
pub static NULL_VALUE_TOKENS: &[&str] = &["", "NA", "N/A", "null", "NaN"];

/// Column separator. The viewer reads comma-delimited files only.
pub const CSV_SEPARATOR: u8 = b',';

/// Maximum rows to scan for schema inference.
const INFER_SCHEMA_ROWS: usize = 200;

// --- TableData ---

/// The in-memory rectangular dataset shown by the table widget.
///
/// Produced once per successful load by [`TableData::from_dataframe`]; the
/// source `DataFrame` is not retained. Every cell is already stringified,
/// with nulls replaced by [`NULL_MARKER`].
///
/// Invariant: every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    /// Ordered column names, as read from the CSV header row.
    pub columns: Vec<String>,
    /// Ordered rows; each row is an ordered sequence of cell values aligned
    /// by position to `columns`.
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Materializes a `DataFrame` into display-ready rows of strings.
    ///
    /// ### Logic
    /// 1. Copy the column names in order.
    /// 2. For each row index, stringify every cell:
    ///    - `AnyValue::Null` becomes [`NULL_MARKER`],
    ///    - strings are used verbatim,
    ///    - all other types go through their `Display` form.
    pub fn from_dataframe(df: &DataFrame) -> Self {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = Vec::with_capacity(df.height());

        for row_index in 0..df.height() {
            let mut cells = Vec::with_capacity(df.width());

            for column in df.get_columns() {
                let value = match column.get(row_index) {
                    Ok(any_value) => match any_value {
                        AnyValue::Null => NULL_MARKER.to_string(),
                        AnyValue::String(s) => s.to_string(), // Directly use the string.
                        AnyValue::StringOwned(s) => s.to_string(),
                        av => av.to_string(), // Use to_string() for other types.
                    },
                    Err(_) => "Error: Value not found".to_string(),
                };
                cells.push(value);
            }

            rows.push(cells);
        }

        TableData { columns, rows }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// --- Loading ---

/// Reads a CSV file into a [`TableData`].
///
/// Failure is terminal for the one operation: the caller clears any displayed
/// table and surfaces the error text. There is no retry logic.
///
/// ### Errors
/// - [`CsvViewError::FileNotFound`] if `path` does not point to a file.
/// - [`CsvViewError::UnsupportedFileType`] if the extension is not `.csv`.
/// - [`CsvViewError::Polars`] for anything the parser raises (malformed
///   rows, encoding issues, etc.).
pub async fn load_table(path: &Path) -> CsvViewResult<TableData> {
    tracing::debug!("fn load_table()\npath: {path:#?}");

    if !path.is_file() {
        return Err(CsvViewError::FileNotFound(path.to_path_buf()));
    }

    // The file dialog filters to `*.csv`, but drag-and-drop and the command
    // line accept arbitrary paths.
    if let FileExtension::Unknown(ext) = FileExtension::from_path(path) {
        return Err(CsvViewError::UnsupportedFileType(format!(
            "'{}': expected a .csv file, got '.{ext}'",
            path.display()
        )));
    }

    let lazyframe = scan_csv(path)?;

    // Execute the lazy plan and collect into an eager DataFrame on a blocking thread.
    let df = execute_polars_blocking(move || lazyframe.with_new_streaming(true).collect()).await?;

    tracing::debug!("Data collection complete. Shape: {:?}", df.shape());

    Ok(TableData::from_dataframe(&df))
}

/// Configures the `LazyCsvReader` for a comma-delimited file with a header row.
fn scan_csv(path: &Path) -> CsvViewResult<LazyFrame> {
    let null_tokens: Vec<PlSmallStr> = NULL_VALUE_TOKENS
        .iter()
        .map(|token| PlSmallStr::from(*token))
        .collect();

    let plpath = PlPath::Local(path.to_path_buf().into());

    let lazyframe = LazyCsvReader::new(plpath)
        .with_low_memory(false) // Can be set to true for lower memory usage at cost of speed.
        .with_encoding(CsvEncoding::LossyUtf8) // Gracefully handle potential encoding errors.
        .with_has_header(true) // Assume a header row.
        .with_try_parse_dates(true) // Attempt automatic date parsing.
        .with_separator(CSV_SEPARATOR)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_ignore_errors(false) // Malformed rows abort the load and surface the error.
        .with_missing_is_null(true) // Treat missing fields as null.
        .with_null_values(Some(NullValues::AllColumns(null_tokens)))
        .with_rechunk(true) // Rechunk the memory to contiguous chunks when parsing is done.
        .finish()?; // Finalize configuration and create the LazyFrame.

    Ok(lazyframe)
}

/// Executes a potentially blocking Polars operation on a separate Tokio blocking thread.
///
/// Wraps the closure `op` which is expected to return a `PolarsResult<T>`,
/// runs it with `spawn_blocking`, awaits the result, and maps both the
/// `JoinError` and the inner `PolarsError` to `CsvViewError`.
pub(crate) async fn execute_polars_blocking<T, F>(op: F) -> CsvViewResult<T>
where
    F: FnOnce() -> Result<T, PolarsError> + Send + 'static,
    T: Debug + Send + 'static,
{
    // Spawn the blocking task
    let result_from_task = spawn_blocking(op).await; // Result<Result<T, PolarsError>, JoinError>

    // Map JoinError to CsvViewError::TokioJoin
    let polars_result = result_from_task.map_err(CsvViewError::from)?;

    // Map PolarsError to CsvViewError::Polars
    let final_result = polars_result.map_err(CsvViewError::from)?;

    Ok(final_result)
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_load_table
#[cfg(test)]
mod tests_load_table {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    // Helper: write CSV content to a temp file with a `.csv` suffix.
    // The NamedTempFile handle must stay alive for the duration of the test.
    fn setup_test_csv(content: &str) -> CsvViewResult<NamedTempFile> {
        let mut temp_file = Builder::new().suffix(".csv").tempfile()?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?; // Ensure data is written
        Ok(temp_file)
    }

    #[tokio::test]
    async fn test_load_csv_values_and_null_markers() -> CsvViewResult<()> {
        let csv_content = "\
name,count,comment
alpha,1,first row
,2,NA
gamma,,last row";

        let temp_file = setup_test_csv(csv_content)?;
        let table = load_table(temp_file.path()).await?;

        assert_eq!(table.columns, vec!["name", "count", "comment"]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.width(), 3);

        // Every displayed cell equals the source value, or NULL_MARKER iff
        // the source value was empty/NA.
        assert_eq!(table.rows[0], vec!["alpha", "1", "first row"]);
        assert_eq!(table.rows[1], vec![NULL_MARKER, "2", NULL_MARKER]);
        assert_eq!(table.rows[2], vec!["gamma", NULL_MARKER, "last row"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_csv_row_count_matches_file() -> CsvViewResult<()> {
        let csv_content = "a,b\n1,2\n3,4\n5,6\n7,8";

        let temp_file = setup_test_csv(csv_content)?;
        let table = load_table(temp_file.path()).await?;

        assert_eq!(table.height(), 4);
        // Row order matches source order.
        assert_eq!(table.rows[0], vec!["1", "2"]);
        assert_eq!(table.rows[3], vec!["7", "8"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_table(Path::new("no/such/file.csv")).await;

        assert!(matches!(result, Err(CsvViewError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_extension() -> CsvViewResult<()> {
        let mut temp_file = Builder::new().suffix(".parquet").tempfile()?;
        temp_file.write_all(b"a,b\n1,2")?;
        temp_file.flush()?;

        let result = load_table(temp_file.path()).await;

        assert!(matches!(result, Err(CsvViewError::UnsupportedFileType(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_malformed_csv_fails() -> CsvViewResult<()> {
        // Second data row has more fields than the header declares.
        let csv_content = "a,b\n1,2\n3,4,5,6,7";

        let temp_file = setup_test_csv(csv_content)?;
        let result = load_table(temp_file.path()).await;

        assert!(result.is_err(), "ragged CSV should fail to load");
        Ok(())
    }

    #[test]
    fn test_from_dataframe_marks_nulls() -> CsvViewResult<()> {
        let df = df!(
            "name" => &[Some("alpha"), None, Some("gamma")],
            "count" => &[Some(1i64), Some(2), None],
        )?;

        let table = TableData::from_dataframe(&df);

        assert_eq!(table.columns, vec!["name", "count"]);
        assert_eq!(table.rows[0], vec!["alpha", "1"]);
        assert_eq!(table.rows[1], vec![NULL_MARKER, "2"]);
        assert_eq!(table.rows[2], vec!["gamma", NULL_MARKER]);
        Ok(())
    }
}
