#![warn(clippy::all)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use csv_view::{Arguments, CsvViewApp, TableContainer};
use tracing::error;

/*
cargo fmt
cargo test -- --nocapture
cargo test -- --show-output tests_load_table
cargo run -- --help
cargo run -- data.csv
cargo doc --open
cargo b -r && cargo install --path=.
*/

/// Initial window size, centered on the primary screen at startup.
const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

fn main() -> eframe::Result<()> {
    // Initialize the tracing subscriber for logging.
    // Use RUST_LOG environment variable to set logging level. eg `export RUST_LOG=info`
    tracing_subscriber::fmt::init();

    // Parse command-line arguments.
    let args = Arguments::build();

    // Configure the native options for the eframe application.
    let native_options = eframe::NativeOptions {
        centered: true,
        vsync: true,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the eframe application.
    eframe::run_native(
        "CSV View",
        native_options,
        Box::new(move |creation_context| {
            // Create a new CsvViewApp. If a path is provided, load the data.
            let app = if args.path.is_file() {
                // Load the data from the specified path.
                let future = TableContainer::load(args.path.clone());

                // Create a new CsvViewApp with the data loading future.
                CsvViewApp::new_with_future(
                    creation_context,
                    Box::new(Box::pin(future)),
                    args.show_tooltips,
                )
            } else {
                // Create a new CsvViewApp without loading data.
                CsvViewApp::new(creation_context, args.show_tooltips)
            };

            match app {
                Ok(app) => Ok(Box::new(app)),
                Err(err) => {
                    error!("Failed to initialize CsvViewApp: {}", err); //Log
                    panic!("Failed to initialize CsvViewApp: {err}"); //Panic
                }
            }
        }),
    )
}
