use crate::{CsvViewError, CsvViewResult};

use rfd::AsyncFileDialog;
use std::path::PathBuf;

/// Opens a file dialog asynchronously, allowing the user to choose a CSV file.
///
/// This function uses the `rfd::AsyncFileDialog` to present a native file
/// dialog to the user, filtered to `*.csv`. If the user selects a file, the
/// function returns the full path to that file. If the user cancels the
/// dialog, the function returns a `CsvViewError::FileNotFound` error.
///
/// # Returns
///
/// - `Ok(PathBuf)`: The path to the selected file if the user successfully chooses one.
/// - `Err(CsvViewError::FileNotFound)`: If the user cancels the dialog (no file is selected).
pub async fn open_csv_file() -> CsvViewResult<PathBuf> {
    // Open the file dialog. `pick_file` returns an `Option<FileHandle>`.
    let opt_file = AsyncFileDialog::new()
        .add_filter("CSV", &["csv"])
        .pick_file()
        .await;

    // Convert the `Option<FileHandle>` to a `CsvViewResult<PathBuf>`.
    // - `map` is used to transform the `PathBuf` inside the `Option`.
    // - `ok_or_else` converts the `Option` to a `Result`:
    //   - If `opt_file` is `Some(file)`, it returns `Ok(PathBuf)`.
    //   - If `opt_file` is `None` (user cancelled), it returns the `FileNotFound` error.
    opt_file
        .map(|file| file.path().to_path_buf()) // Extract PathBuf from FileHandle.
        .ok_or_else(|| CsvViewError::FileNotFound(PathBuf::new())) // Convert None to error.
}
