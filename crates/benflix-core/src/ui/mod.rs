//! Drawing for the nice!view status panel
//!
//! The panel is 160x68. The left 86 columns show the decorative art, the
//! right 68 columns show the status canvas, drawn upright and rotated a
//! quarter turn before composition.

pub mod art;
pub mod battery;
pub mod icons;
pub mod status;
pub mod styling;

pub use battery::{BATTERY_REGION, battery_text, draw_battery, draw_battery_with_font};
pub use status::draw_status;
pub use styling::{LabelStyle, arc_style, label_style, line_style, rect_style};

/// Panel width in pixels
pub const DISPLAY_WIDTH_PX: u16 = 160;
/// Panel height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 68;

/// Side length of the square status canvas.
pub const CANVAS_SIZE: usize = 68;
