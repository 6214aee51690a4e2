use crate::{
    CsvViewResult, Error, MyStyle, Notification, RowFilter, TableContainer, TableResponse,
    TooltipController, open_csv_file,
};

use egui::{CentralPanel, Context, ScrollArea, TopBottomPanel, warn_if_debug_build};
use std::sync::Arc;
use tokio::sync::oneshot::{self, Receiver, error::TryRecvError};
use tracing::error;

/// Type alias for a Result with a `TableContainer`.
pub type ContainerResult = CsvViewResult<TableContainer>;
/// Type alias for a boxed, dynamically dispatched Future that returns a `ContainerResult`.
pub type DataFuture = Box<dyn Future<Output = ContainerResult> + Unpin + Send + 'static>;

/// The main application struct for CSV View.
pub struct CsvViewApp {
    /// The loaded table, if any. Replaced wholesale on each load.
    pub table_container: Option<Arc<TableContainer>>,
    /// Keyword filter highlighting matching rows.
    pub row_filter: RowFilter,
    /// Controller for the long-cell-value hover tooltip.
    pub tooltips: TooltipController,
    /// Optional Notification window for displaying errors.
    pub notification: Option<Box<dyn Notification>>,

    /// Tokio runtime for asynchronous operations (file loading, sorting).
    runtime: tokio::runtime::Runtime,
    /// Channel for receiving the result of asynchronous data loading.
    pipe: Option<Receiver<ContainerResult>>,
    /// Vector of active asynchronous tasks. Used to prevent the app from hanging.
    tasks: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for CsvViewApp {
    fn default() -> Self {
        Self {
            table_container: None,
            row_filter: RowFilter::default(),
            tooltips: TooltipController::default(),
            runtime: tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to build Tokio runtime"),
            pipe: None,
            notification: None,
            tasks: Vec::new(),
        }
    }
}

impl CsvViewApp {
    /// Creates a new `CsvViewApp` instance.
    pub fn new(cc: &eframe::CreationContext<'_>, show_tooltips: bool) -> CsvViewResult<Self> {
        cc.egui_ctx.set_style_init(); // Apply custom styles.
        Ok(CsvViewApp {
            tooltips: TooltipController::new(show_tooltips),
            ..Default::default()
        })
    }

    /// Creates a new `CsvViewApp` with a pre-existing `DataFuture`.
    pub fn new_with_future(
        cc: &eframe::CreationContext<'_>,
        future: DataFuture,
        show_tooltips: bool,
    ) -> CsvViewResult<Self> {
        let mut app = Self::new(cc, show_tooltips)?;
        app.run_data_future(future, &cc.egui_ctx);
        Ok(app)
    }

    /// Removes the displayed table. Idempotent; safe to call when nothing is displayed.
    fn clear_table(&mut self) {
        self.table_container = None;
    }

    /// Checks if a Notification is active and displays it.
    fn check_notification(&mut self, ctx: &Context) {
        if let Some(notification) = &mut self.notification {
            if !notification.show(ctx) {
                self.notification = None; // Remove closed Notification.
            }
        }
    }

    /// Checks if there is a pending data loading operation (asynchronous).
    /// If data is available or an error occurred, process it. If the operation is still
    /// in progress, keeps it in the `pipe`. Returns `true` if loading is pending,
    /// and `false` if loading is complete (either with data or an error).
    fn check_data_pending(&mut self) -> bool {
        // Attempt to take ownership of the receiver. If it's None (no pending operation), return false.
        let Some(mut output) = self.pipe.take() else {
            return false;
        };

        // Try to receive a value from the channel without blocking.
        match output.try_recv() {
            // Successfully received data (Ok) or an error (Err) from the background task.
            Ok(data_result) => {
                match data_result {
                    // Data loaded successfully: fully replace any previous table.
                    Ok(container) => {
                        self.table_container = Some(Arc::new(container));
                        false // Indicate that data loading is complete.
                    }
                    // An error occurred during data loading.
                    Err(err) => {
                        // The failed load clears the display; the app stays
                        // usable for a subsequent attempt.
                        self.clear_table();

                        // Surface the error text verbatim to the user.
                        self.notification = Some(Box::new(Error {
                            message: err.to_string(),
                        }));
                        error!("Data loading failed: {}", err); // Log full error details.
                        false // Indicate that data loading is complete (with error).
                    }
                }
            }
            // An error occurred while trying to receive from the channel.
            Err(try_recv_error) => match try_recv_error {
                // The channel is empty (data not yet available). This is the normal "pending" state.
                TryRecvError::Empty => {
                    // Put the receiver back into `self.pipe` to check again later.
                    self.pipe = Some(output);
                    true // Indicate that data loading is still pending.
                }
                // The channel is closed (the sender was dropped). This is an unexpected error state.
                TryRecvError::Closed => {
                    let err_msg = "Data operation terminated without response.".to_string();
                    // Notify the user and log the error.
                    self.notification = Some(Box::new(Error {
                        message: err_msg.clone(),
                    }));
                    error!("{}", err_msg);
                    false // Indicate data loading is complete (with error).
                }
            },
        }
    }

    /// Runs a `DataFuture` to load data asynchronously.
    ///
    /// This function takes a future, spawns a Tokio task, and sets up a channel to receive the result.
    fn run_data_future(&mut self, future: DataFuture, ctx: &Context) {
        // Before scheduling a new future, ensure no tasks are stuck
        self.tasks.retain(|task| !task.is_finished());

        // Create a oneshot channel for sending the data from the async task to the UI thread.
        let (tx, rx) = oneshot::channel::<ContainerResult>();
        self.pipe = Some(rx);

        // Clone the context for use within the asynchronous task (to request repaints).
        let ctx_clone = ctx.clone();

        // Spawn an async task to load the data.
        let handle = self.runtime.spawn(async move {
            let data = future.await;
            // Handle potential error if the receiver is dropped.
            if tx.send(data).is_err() {
                error!("Receiver dropped before data could be sent.");
            }

            // Request a repaint of the UI to display the loaded data.
            ctx_clone.request_repaint();
        });

        self.tasks.push(handle); // Track the task.
    }
}

impl eframe::App for CsvViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Check and display any active Notifications (errors).
        self.check_notification(ctx);

        // Handle dropped files. The loader rejects non-CSV extensions.
        if let Some(dropped_file) = ctx.input(|i| i.raw.dropped_files.last().cloned()) {
            if let Some(path) = &dropped_file.path {
                let future = TableContainer::load(path.clone());
                self.run_data_future(Box::new(Box::pin(future)), ctx);
            }
        }

        // Define the main UI layout.
        //
        //  | load button  tooltip checkbox  filter |
        //  -----------------------------------------
        //  |                                       |
        //  |              main table               |
        //  |                                       |
        //  -----------------------------------------
        //  | loaded path + shape footer            |

        TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Load CSV File").clicked() {
                    // The native dialog blocks the calling flow until dismissed.
                    // A cancelled dialog is not an error; it is simply ignored.
                    if let Ok(path) = self.runtime.block_on(open_csv_file()) {
                        let future = TableContainer::load(path);
                        self.run_data_future(Box::new(Box::pin(future)), ctx);
                    }
                }

                ui.checkbox(&mut self.tooltips.enabled, "Show Tooltip")
                    .on_hover_text("Show a floating tooltip for long cell values.");

                ui.separator();

                if self.row_filter.render_filter(ui) {
                    tracing::debug!("Filter changed: {:?}", self.row_filter);
                }
            });
        });

        TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            // Display the path and shape of the loaded data.
            ui.horizontal(|ui| match &self.table_container {
                Some(container) => {
                    ui.label(format!(
                        "{} ({} rows x {} columns)",
                        container.path.display(),
                        container.table.height(),
                        container.table.width()
                    ));
                }
                None => {
                    ui.label("no file set");
                }
            });
        });

        // Main table display area.
        // CentralPanel must be added after all other panels in your egui layout!
        CentralPanel::default().show(ctx, |ui| {
            // Display a warning message if the application is built in debug mode.
            warn_if_debug_build(ui);

            // Disable UI interaction while data is being loaded (data_pending is true).
            if self.check_data_pending() {
                ui.disable();
            }

            match &self.table_container {
                Some(container) => {
                    // Store the table response here, *before* the ScrollArea.
                    let mut table_response = TableResponse::default();

                    // Table is loaded and available. Display it with its own
                    // horizontal scroll position; vertical scrolling belongs
                    // to the table body itself.
                    ScrollArea::horizontal()
                        .auto_shrink([false, false]) // Prevent the scroll area from shrinking.
                        .show(ui, |ui| {
                            table_response = container.render_table(ui, &self.row_filter);
                        }); // Close ScrollArea *before* using run_data_future.

                    // Tooltip path: skipped entirely while disabled.
                    if self.tooltips.enabled {
                        if let Some(cell) = table_response.hovered {
                            if let Some(value) = container.cell_value(&cell) {
                                self.tooltips.show(ctx, value);
                            }
                        }
                    }

                    // If a header sort button was clicked, initiate sorting.
                    if let Some(sort) = table_response.sort {
                        // Create a future for the sorting operation.
                        let future = container.as_ref().clone().sort(Some(sort));
                        // Run the data future to execute the sorting operation asynchronously.
                        self.run_data_future(Box::new(Box::pin(future)), ctx);
                    }
                }
                None => {
                    // Check if data loading is pending (e.g., initial load in progress).
                    if self.check_data_pending() {
                        // Data loading is pending, show a loading spinner in the center of the panel.
                        ui.centered_and_justified(|ui| {
                            ui.spinner();
                        });
                    } else {
                        // No data loaded and no data loading pending.
                        // Display a prompt message to the user.
                        ui.centered_and_justified(|ui| {
                            ui.label("Drag and drop a CSV file here.");
                        });
                    }
                }
            }
        });
    }
}
