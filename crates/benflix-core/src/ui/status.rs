//! Upright layout of the status canvas, before rotation

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use super::CANVAS_SIZE;
use super::battery::draw_battery;
use super::icons::{GLYPH_SIZE, draw_connection_glyph};
use super::styling::{label_style, rect_style};
use crate::config::StatusConfig;
use crate::widgets::StatusState;

/// Connection glyph sits flush with the top-right corner.
pub const GLYPH_ORIGIN: Point = Point::new(CANVAS_SIZE as i32 - GLYPH_SIZE.width as i32, 0);

/// Box the name label is centred in.
pub const LABEL_AREA: Rectangle =
    Rectangle::new(Point::new(0, 28), Size::new(CANVAS_SIZE as u32, 20));

/// Paint the whole canvas for `state`.
///
/// Clears to the background, then draws the battery readout, the connection
/// glyph and the name label. Same state in, same pixels out.
pub fn draw_status<D>(
    target: &mut D,
    state: &StatusState,
    config: &StatusConfig,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let palette = config.palette();

    Rectangle::new(Point::zero(), Size::new(CANVAS_SIZE as u32, CANVAS_SIZE as u32))
        .into_styled(rect_style(palette.background))
        .draw(target)?;

    draw_battery(target, state, config.battery_style, palette)?;

    draw_connection_glyph(target, GLYPH_ORIGIN, state.connected, palette.foreground)?;

    label_style(palette.foreground, &FONT_10X20, Alignment::Center).draw_in(
        target,
        &config.label,
        &LABEL_AREA,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelGrid};

    type StatusCanvas = Canvas<BinaryColor, CANVAS_SIZE, CANVAS_SIZE>;

    fn render(state: StatusState, config: &StatusConfig) -> StatusCanvas {
        // Start from the "wrong" colour so the clear is observable
        let mut canvas = StatusCanvas::new(config.palette().foreground);
        draw_status(&mut canvas, &state, config).unwrap();
        canvas
    }

    fn ink(canvas: &StatusCanvas, config: &StatusConfig, point: Point) -> bool {
        canvas.pixel(point) == Some(config.palette().foreground)
    }

    #[test]
    fn test_connection_glyph_matches_state() {
        let config = StatusConfig::default().with_inverted(false);
        let spine = GLYPH_ORIGIN + Point::new(4, 0);
        let cross_arm = GLYPH_ORIGIN + Point::new(1, 2);

        let connected = render(
            StatusState {
                connected: true,
                ..StatusState::default()
            },
            &config,
        );
        assert!(ink(&connected, &config, spine));
        assert!(!ink(&connected, &config, cross_arm));

        let disconnected = render(StatusState::default(), &config);
        assert!(!ink(&disconnected, &config, spine));
        assert!(ink(&disconnected, &config, cross_arm));
    }

    #[test]
    fn test_background_cleared() {
        let config = StatusConfig::default();
        let canvas = render(StatusState::default(), &config);
        // Bottom rows hold nothing but background
        for x in 0..CANVAS_SIZE as i32 {
            assert!(!ink(&canvas, &config, Point::new(x, CANVAS_SIZE as i32 - 1)));
        }
    }

    #[test]
    fn test_label_drawn_in_label_area() {
        let config = StatusConfig::default();
        let canvas = render(StatusState::default(), &config);

        let in_area = LABEL_AREA.points().any(|p| ink(&canvas, &config, p));
        assert!(in_area);
    }

    #[test]
    fn test_inverted_palette_swaps_pixels() {
        let state = StatusState {
            battery: 64,
            charging: true,
            connected: true,
        };
        let normal = render(state, &StatusConfig::default().with_inverted(false));
        let inverted = render(state, &StatusConfig::default().with_inverted(true));

        for y in 0..CANVAS_SIZE as i32 {
            for x in 0..CANVAS_SIZE as i32 {
                let p = Point::new(x, y);
                assert_eq!(normal.pixel(p).map(|c| c.invert()), inverted.pixel(p));
            }
        }
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let config = StatusConfig::default();
        let state = StatusState {
            battery: 12,
            charging: true,
            connected: false,
        };
        let mut canvas = render(state, &config);
        let first = canvas.clone();
        draw_status(&mut canvas, &state, &config).unwrap();
        assert_eq!(canvas, first);
    }
}
