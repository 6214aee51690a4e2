#![warn(clippy::all)]
#![doc = include_str!("../README.md")]

// Modules that make up the CSV View library.
mod args;
mod container;
mod error;
mod file_dialog;
mod file_extension;
mod filter;
mod layout;
mod loader;
mod sort;
mod tooltip;
mod traits;

// Publicly expose the contents of these modules.
pub use self::{
    args::Arguments,
    container::*,
    error::*,
    file_dialog::*,
    file_extension::*,
    filter::*,
    layout::*,
    loader::*,
    sort::*,
    tooltip::*,
    traits::*,
};
