//! Defines custom traits and trait implementations for `egui` types.
//!
//! This module centralizes extensions to existing types (`egui::Context`,
//! `egui::Ui`, `std::path::Path`) and interfaces (`Notification`) for common
//! UI patterns. It interacts primarily with `layout.rs` (styling,
//! notifications) and `container.rs` (header sort buttons).

use crate::SortState;

use egui::{
    Align, Color32, Context,
    FontFamily::Proportional,
    FontId, Frame, Layout, Response, Spacing, Stroke, Style,
    TextStyle::{Body, Button, Heading, Monospace, Small},
    Ui, Vec2, Window,
    style::ScrollStyle,
};

use std::{ffi::OsStr, path::Path, sync::Arc};

/// Defines custom text styles for the egui context.
/// Overrides default `egui` font sizes for different logical text styles (Heading, Body, etc.).
/// Used by `MyStyle::set_style_init`.
pub const CUSTOM_TEXT_STYLE: [(egui::TextStyle, egui::FontId); 5] = [
    (Heading, FontId::new(18.0, Proportional)),
    (Body, FontId::new(16.0, Proportional)),
    (Button, FontId::new(16.0, Proportional)),
    (Monospace, FontId::new(15.0, Proportional)), // Adjusted size for Proportional font
    (Small, FontId::new(14.0, Proportional)),
];

/// A trait for applying custom styling to the `egui` context (`Context`).
/// Used once at startup by `layout.rs::CsvViewApp::new`.
pub trait MyStyle {
    /// Applies a pre-defined application style to the `egui` context.
    fn set_style_init(&self);
}

impl MyStyle for Context {
    /// Configures the application's look and feel (spacing, text styles) by modifying `egui::Style`.
    ///
    /// ### Logic
    /// 1. Define custom scrollbar settings (`ScrollStyle`).
    /// 2. Define custom widget spacing (`Spacing`).
    /// 3. Create a full `Style` struct incorporating `Spacing` and `CUSTOM_TEXT_STYLE`.
    /// 4. Apply the constructed `Style` to the `egui::Context`.
    fn set_style_init(&self) {
        // 1. Define ScrollStyle.
        let scroll = ScrollStyle {
            handle_min_length: 32.0,
            ..ScrollStyle::default()
        };

        // 2. Define Spacing.
        let spacing = Spacing {
            scroll,
            item_spacing: [8.0, 6.0].into(),
            ..Spacing::default()
        };

        // 3. Create the main Style struct.
        let style = Style {
            spacing,                               // Apply custom spacing.
            text_styles: CUSTOM_TEXT_STYLE.into(), // Apply custom text styles.
            ..Style::default()
        };

        // 4. Set the style on the egui Context.
        self.set_style(style);
    }
}

/// Trait for modal Notification windows (like error dialogs).
/// Allows `layout.rs` to manage notification types polymorphically via `Box<dyn Notification>`.
pub trait Notification: Send + Sync + 'static {
    /// Renders the notification window using `egui::Window`.
    /// Called repeatedly by `layout.rs::check_notification` while the notification is active.
    ///
    /// ### Returns
    /// `true` if the window should remain open, `false` if closed.
    fn show(&mut self, ctx: &Context) -> bool;
}

/// Notification struct for displaying error messages. Implements `Notification`.
pub struct Error {
    /// The error message content. Set by the caller in `layout.rs`.
    pub message: String,
}

impl Notification for Error {
    /// Renders the Error notification window.
    ///
    /// ### Logic
    /// 1. Define `open` state (initially `true`).
    /// 2. Create `egui::Window` named "Error", bound to `open`.
    /// 3. Configure window (e.g., non-collapsible).
    /// 4. Layout content area (fixed width, alignment).
    /// 5. Use a `Frame` with distinct styling for visual emphasis.
    /// 6. Display the error `message` within the frame.
    /// 7. Return the `open` state.
    fn show(&mut self, ctx: &Context) -> bool {
        let mut open = true; // 1. Window starts open.

        // 2. Create window.
        Window::new("Error")
            .collapsible(false) // 3. Configure.
            .open(&mut open)
            .show(ctx, |ui| {
                // 4. Layout content.
                let width_max = ui.available_width() * 0.80;
                ui.allocate_ui_with_layout(
                    Vec2::new(width_max, ui.available_height()),
                    Layout::top_down(Align::LEFT),
                    |ui| {
                        // 5. Add styled frame.
                        Frame::default()
                            .fill(Color32::from_rgb(255, 200, 200)) // Light red bg
                            .stroke(Stroke::new(1.0, Color32::DARK_RED)) // Dark red border
                            .outer_margin(2.0)
                            .inner_margin(10.0)
                            .show(ui, |ui| {
                                // 6. Display message.
                                ui.colored_label(Color32::BLACK, &self.message);
                                ui.disable(); // Optionally disable interaction within.
                            });
                    },
                );
            });

        open // 7. Return state.
    }
}

/// Trait adding the sort button widget used in table headers.
/// Provides a consistent interface for `container.rs::render_table`.
pub trait ExtraInteractions {
    /// Renders a clickable header button combining the sort icon and the column name.
    ///
    /// ### Arguments
    /// * `current`: The applied sort state for the whole table. Updated in
    ///   place when this button is clicked.
    /// * `state`: The sort state of *this* column (NotSorted, Ascending, Descending).
    ///
    /// ### Returns
    /// * `egui::Response`: Interaction response of the button. The caller
    ///   reacts to `clicked()` to trigger the actual sort.
    fn sort_button(&mut self, current: &mut Option<Arc<SortState>>, state: Arc<SortState>)
    -> Response;
}

impl ExtraInteractions for Ui {
    /// Implements the sort button for `egui::Ui`.
    ///
    /// ### Logic
    /// 1. Compose the label from the state's icon and the column name.
    /// 2. Render a button with hover text.
    /// 3. On click, advance the column's cycle and store it as the applied state.
    fn sort_button(
        &mut self,
        current: &mut Option<Arc<SortState>>,
        state: Arc<SortState>,
    ) -> Response {
        let column_name = state.column_name();
        let label = format!("{} {column_name}", state.get_icon());

        let response = self
            .button(label)
            .on_hover_text(format!("Click to sort by: {column_name}"));

        if response.clicked() {
            *current = Some(Arc::new(state.cycle_next()));
        }

        response
    }
}

/// Trait to extend `Path` with a convenient method for getting the lowercase file extension.
/// Used by `file_extension.rs`.
pub trait PathExtension {
    /// Returns the file extension as a lowercase `String`, or `None`.
    fn extension_as_lowercase(&self) -> Option<String>;
}

impl PathExtension for Path {
    /// Implementation for `Path`. Gets extension, converts to &str (lossy), then lowercases.
    ///
    /// ### Logic
    /// 1. Call `self.extension()` -> `Option<&OsStr>`.
    /// 2. Convert `OsStr` to `&str` via `to_str` -> `Option<&str>`.
    /// 3. Map `&str` to lowercase `String` -> `Option<String>`.
    fn extension_as_lowercase(&self) -> Option<String> {
        self.extension() // 1. Get OsStr extension.
            .and_then(OsStr::to_str) // 2. Try converting to &str.
            .map(str::to_lowercase) // 3. Convert to lowercase String if successful.
    }
}

// --- Unit Tests ---

#[cfg(test)]
mod tests_path_extension {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extension_as_lowercase_some() {
        let path = PathBuf::from("my_file.TXT");
        assert_eq!(path.extension_as_lowercase(), Some("txt".to_string()));
    }

    #[test]
    fn test_extension_as_lowercase_none() {
        let path = PathBuf::from("myfile");
        assert_eq!(path.extension_as_lowercase(), None);
    }

    #[test]
    fn test_extension_as_lowercase_multiple_dots() {
        let path = PathBuf::from("file.name.with.multiple.dots.ext");
        assert_eq!(path.extension_as_lowercase(), Some("ext".to_string()));
    }
}
