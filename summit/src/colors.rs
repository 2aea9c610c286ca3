//! Palette for the map view.

use summit_core::Color;

/// Start marker background.
pub const START: Color = Color::from_rgb(255, 0, 0);
/// End marker background.
pub const END: Color = Color::from_rgb(0, 0, 255);
/// Foreground drawn over filled cells.
pub const INK: Color = Color::from_rgb(16, 18, 24);
/// Foreground drawn over the start and end markers.
pub const MARKER_INK: Color = Color::from_rgb(248, 248, 242);
/// Background of cells waiting in the frontier.
pub const QUEUED: Color = Color::from_rgb(90, 80, 30);

/// Status line colours.
pub const STATUS_FG: Color = Color::from_rgb(248, 248, 242);
pub const HELP_FG: Color = Color::from_rgb(98, 100, 106);
pub const FOUND: Color = Color::from_rgb(80, 200, 80);
pub const LOST: Color = Color::from_rgb(255, 85, 85);

/// Elevation gradient: green at the lowest cells, pale cyan at the top.
///
/// `t` is the relative height, clamped to `[0, 1]`.
pub fn elevation(t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::from_unit_rgb(0.2 + 0.6 * t, 1.0, 0.4 + 0.6 * t)
}
