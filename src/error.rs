use polars::prelude::PolarsError;
use std::{io, path::PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/**
Result type to simplify function signatures.

This is a custom result type that uses our custom `CsvViewError` for the error type.

Functions can return `CsvViewResult<T>` and then use `?` to automatically propagate errors.
*/
pub type CsvViewResult<T> = Result<T, CsvViewError>;

/**
Custom error type for CSV View.

This enum defines all the possible errors that can occur in the application.

We use the `thiserror` crate to derive the `Error` trait and automatically
implement `Display` using the `#[error(...)]` attribute.
*/
#[derive(Error, Debug)]
pub enum CsvViewError {
    // Wrapper for standard IO errors.
    // The #[from] attribute automatically converts io::Error to CsvViewError::Io.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Wrapper for Polars errors (from the Polars library).
    // #[from] handles conversion. Covers malformed rows, encoding issues and
    // failures while executing the lazy scan.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    // Indicates that a specified file could not be found, storing the attempted path.
    // Also produced when the user cancels the file dialog (empty path).
    #[error("File not found: {0:#?}")]
    FileNotFound(PathBuf),

    // Indicates that a provided file extension or file type are not supported.
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    // Wrapper for Tokio JoinErrors, occurring when asynchronous tasks fail.
    #[error("Tokio JoinError: {0}")]
    TokioJoin(#[from] JoinError),

    // A catch-all for other, less specific errors not covered by specific variants.
    // Uses a String to describe the error. Consider using this sparingly.
    #[error("Other error: {0}")]
    Other(String),
}

// Implementation of the From trait to convert a String into a CsvViewError.
// This allows us to easily convert generic error strings into our custom error type.
impl From<String> for CsvViewError {
    fn from(err: String) -> CsvViewError {
        // Prefer using specific error variants when possible, fallback to Other.
        CsvViewError::Other(err)
    }
}
