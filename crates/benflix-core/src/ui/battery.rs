//! Battery readout in the top-left corner of the status canvas

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Alignment, Baseline};

use super::icons::draw_bolt;
use super::styling::{label_style, rect_style};
use crate::config::{BatteryStyle, Palette};
use crate::widgets::StatusState;

/// Area the percentage text is centred in: the inside of the battery outline.
pub const BATTERY_REGION: Rectangle = Rectangle::new(Point::new(1, 3), Size::new(27, 10));

/// Battery body including its one pixel border.
const OUTLINE: Rectangle = Rectangle::new(Point::new(0, 2), Size::new(29, 12));
const NUB: Rectangle = Rectangle::new(Point::new(30, 5), Size::new(3, 6));
const NUB_INNER: Rectangle = Rectangle::new(Point::new(31, 6), Size::new(1, 4));

/// Top-left of the fill bar; its width tracks the charge level.
const BAR_ORIGIN: Point = Point::new(2, 4);
const BAR_HEIGHT: u32 = 8;

/// Top-left of the charging bolt. It pokes one row above the canvas.
pub const CHARGE_ICON_OFFSET: Point = Point::new(9, -1);

/// `"{:>3}%"`, so 0-100 always renders four characters wide.
pub fn battery_text(level: u8) -> heapless::String<8> {
    let mut text = heapless::String::new();
    write!(text, "{:>3}%", level).ok();
    text
}

/// Top-left position that centres a `text_size` box inside `region`.
///
/// Uses truncating division, so text wider or taller than the region spills
/// evenly over both edges.
pub fn centered_origin(text_size: Size, region: &Rectangle) -> Point {
    let dx = (region.size.width as i32 - text_size.width as i32) / 2;
    let dy = (region.size.height as i32 - text_size.height as i32) / 2;
    region.top_left + Point::new(dx, dy)
}

/// Width of the fill bar for a charge level: `(level + 2) / 4`.
///
/// Levels above 100 draw a full bar so it never leaves the outline.
pub fn bar_width(level: u8) -> u32 {
    (level.min(100) as u32 + 2) / 4
}

/// Draw the battery readout with the default 6x10 font.
pub fn draw_battery<D>(
    target: &mut D,
    state: &StatusState,
    style: BatteryStyle,
    palette: Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_battery_with_font(target, state, style, palette, &FONT_6X10)
}

/// Draw the battery readout with `font`.
///
/// Fonts taller than ten pixels overflow the battery outline.
pub fn draw_battery_with_font<D>(
    target: &mut D,
    state: &StatusState,
    style: BatteryStyle,
    palette: Palette,
    font: &MonoFont<'_>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if matches!(style, BatteryStyle::Outlined | BatteryStyle::Bar) {
        draw_outline(target, palette)?;
    }

    match style {
        BatteryStyle::Percentage | BatteryStyle::Outlined => {
            let text = battery_text(state.battery);
            let character_style = MonoTextStyle::new(font, palette.foreground);
            let size = character_style
                .measure_string(&text, Point::zero(), Baseline::Top)
                .bounding_box
                .size;
            let origin = centered_origin(size, &BATTERY_REGION);

            label_style(palette.foreground, font, Alignment::Left)
                .draw_at(target, &text, origin)?;
        }
        BatteryStyle::Bar => {
            Rectangle::new(BAR_ORIGIN, Size::new(bar_width(state.battery), BAR_HEIGHT))
                .into_styled(rect_style(palette.foreground))
                .draw(target)?;
        }
    }

    if state.charging {
        draw_bolt(
            target,
            CHARGE_ICON_OFFSET,
            palette.foreground,
            palette.background,
        )?;
    }

    Ok(())
}

fn draw_outline<D>(target: &mut D, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fg = rect_style(palette.foreground);
    let bg = rect_style(palette.background);

    OUTLINE.into_styled(fg).draw(target)?;
    BATTERY_REGION.into_styled(bg).draw(target)?;
    NUB.into_styled(fg).draw(target)?;
    NUB_INNER.into_styled(bg).draw(target)?;
    Ok(())
}
