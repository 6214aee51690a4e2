use egui::{Area, Context, Frame, Id, Order, pos2};

// --- Constants ---

/// Minimum cell text length (in characters) before a tooltip is shown.
pub const TOOLTIP_TEXT_THRESHOLD: usize = 25;

/// Word-wrap width of the floating tooltip.
pub const TOOLTIP_WIDTH: f32 = 300.0;

/// Offset of the tooltip from the pointer position, on both axes.
pub const TOOLTIP_CURSOR_OFFSET: f32 = 10.0;

/// Shows a floating tooltip with the full content of long cell values.
///
/// Toggled by the "Show Tooltip" checkbox. While disabled no hover
/// resolution and no drawing happen at all; in immediate mode the tooltip is
/// recreated each frame, so "hide" is simply not drawing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipController {
    /// Bound to the "Show Tooltip" checkbox.
    pub enabled: bool,
}

impl TooltipController {
    pub fn new(enabled: bool) -> Self {
        TooltipController { enabled }
    }

    /// Whether a cell value is long enough to warrant a tooltip.
    pub fn qualifies(value: &str) -> bool {
        value.chars().count() > TOOLTIP_TEXT_THRESHOLD
    }

    /// Horizontal tooltip position for a pointer at `pointer_x`, clamped so
    /// the tooltip never extends past the right screen edge:
    /// `x + TOOLTIP_WIDTH <= screen_width` always holds.
    pub fn clamp_x(pointer_x: f32, screen_width: f32) -> f32 {
        let x = pointer_x + TOOLTIP_CURSOR_OFFSET;
        if x + TOOLTIP_WIDTH > screen_width {
            screen_width - (TOOLTIP_WIDTH + TOOLTIP_CURSOR_OFFSET)
        } else {
            x
        }
    }

    /// Draws the tooltip for the hovered cell value, if it qualifies.
    ///
    /// ### Logic
    /// 1. Skip entirely while disabled (zero overhead).
    /// 2. Skip when the pointer is not over the UI or the value is short.
    /// 3. Place the tooltip at pointer + offset, clamped horizontally.
    /// 4. Draw a word-wrapped label on the tooltip layer.
    pub fn show(&self, ctx: &Context, value: &str) {
        if !self.enabled {
            return;
        }

        let Some(pointer) = ctx.pointer_hover_pos() else {
            return;
        };

        if !Self::qualifies(value) {
            return;
        }

        let x = Self::clamp_x(pointer.x, ctx.screen_rect().width());
        let y = pointer.y + TOOLTIP_CURSOR_OFFSET;

        Area::new(Id::new("cell_tooltip"))
            .order(Order::Tooltip)
            .fixed_pos(pos2(x, y))
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(TOOLTIP_WIDTH);
                    ui.label(value);
                });
            });
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_tooltip
#[cfg(test)]
mod tests_tooltip {
    use super::*;

    #[test]
    fn test_qualifies_threshold() {
        let short = "x".repeat(TOOLTIP_TEXT_THRESHOLD); // exactly 25 chars
        let long = "x".repeat(TOOLTIP_TEXT_THRESHOLD + 1); // 26 chars

        assert!(!TooltipController::qualifies(&short));
        assert!(TooltipController::qualifies(&long));
        assert!(!TooltipController::qualifies(""));
    }

    #[test]
    fn test_clamp_x_unclamped() {
        // Far from the right edge: plain pointer offset.
        let x = TooltipController::clamp_x(100.0, 1920.0);
        assert_eq!(x, 110.0);
        assert!(x + TOOLTIP_WIDTH <= 1920.0);
    }

    #[test]
    fn test_clamp_x_clamped_at_right_edge() {
        let screen_width = 800.0;
        let x = TooltipController::clamp_x(700.0, screen_width);

        assert_eq!(x, screen_width - (TOOLTIP_WIDTH + TOOLTIP_CURSOR_OFFSET));
        assert!(x + TOOLTIP_WIDTH <= screen_width);
    }

    #[test]
    fn test_clamp_x_boundary() {
        let screen_width = 1000.0;
        // Pointer such that x + offset + width lands exactly on the edge.
        let pointer_x = screen_width - TOOLTIP_WIDTH - TOOLTIP_CURSOR_OFFSET;
        let x = TooltipController::clamp_x(pointer_x, screen_width);

        assert_eq!(x, pointer_x + TOOLTIP_CURSOR_OFFSET);
        assert!(x + TOOLTIP_WIDTH <= screen_width);
    }
}
