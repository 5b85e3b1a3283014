//! Status icons: charging bolt and the connection glyphs

use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Line;

use super::styling::line_style;

/// Bounding box shared by both connection glyphs.
pub const GLYPH_SIZE: Size = Size::new(9, 13);

pub const BOLT_SIZE: Size = Size::new(8, 8);

/// Lightning bolt, one byte per row, MSB is the leftmost pixel.
pub static BOLT: [u8; 8] = [0x0E, 0x1C, 0x38, 0x7E, 0x1C, 0x38, 0x70, 0x60];

const BLUETOOTH_SEGMENTS: [(Point, Point); 5] = [
    (Point::new(4, 0), Point::new(4, 12)),
    (Point::new(4, 0), Point::new(7, 3)),
    (Point::new(7, 3), Point::new(1, 9)),
    (Point::new(4, 12), Point::new(7, 9)),
    (Point::new(7, 9), Point::new(1, 3)),
];

const CLOSE_SEGMENTS: [(Point, Point); 2] = [
    (Point::new(1, 2), Point::new(7, 8)),
    (Point::new(7, 2), Point::new(1, 8)),
];

/// Draw the set bits of a 1-bit mask in `color`; clear bits are left alone.
pub fn draw_mask<D>(
    target: &mut D,
    data: &[u8],
    size: Size,
    origin: Point,
    color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let width = size.width as usize;
    let stride = width.div_ceil(8);

    let pixels = (0..size.height as usize).flat_map(move |y| {
        (0..width).filter_map(move |x| {
            let byte = *data.get(y * stride + x / 8)?;
            if (byte >> (7 - (x % 8))) & 1 == 1 {
                Some(Pixel(origin + Point::new(x as i32, y as i32), color))
            } else {
                None
            }
        })
    });

    target.draw_iter(pixels)
}

/// Draw a mask with a one pixel `halo` around it so it stays readable when
/// drawn over other content.
pub fn draw_mask_outlined<D>(
    target: &mut D,
    data: &[u8],
    size: Size,
    origin: Point,
    color: D::Color,
    halo: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx != 0 || dy != 0 {
                draw_mask(target, data, size, origin + Point::new(dx, dy), halo)?;
            }
        }
    }
    draw_mask(target, data, size, origin, color)
}

pub fn draw_bolt<D>(
    target: &mut D,
    origin: Point,
    color: D::Color,
    halo: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    draw_mask_outlined(target, &BOLT, BOLT_SIZE, origin, color, halo)
}

fn draw_segments<D, C>(
    target: &mut D,
    segments: &[(Point, Point)],
    origin: Point,
    color: C,
) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    let style = line_style(color, 1);
    for &(start, end) in segments {
        Line::new(origin + start, origin + end)
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

/// Bluetooth rune when `connected`, a cross otherwise.
pub fn draw_connection_glyph<D, C>(
    target: &mut D,
    origin: Point,
    connected: bool,
    color: C,
) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    if connected {
        draw_segments(target, &BLUETOOTH_SEGMENTS, origin, color)
    } else {
        draw_segments(target, &CLOSE_SEGMENTS, origin, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelGrid};
    use embedded_graphics::pixelcolor::BinaryColor;

    type Small = Canvas<BinaryColor, 16, 16>;

    #[test]
    fn test_mask_only_touches_set_bits() {
        let mut canvas = Small::new(BinaryColor::Off);
        draw_mask(
            &mut canvas,
            &[0b1000_0001],
            Size::new(8, 1),
            Point::new(2, 2),
            BinaryColor::On,
        )
        .unwrap();

        assert_eq!(canvas.pixel(Point::new(2, 2)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(9, 2)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(3, 2)), Some(BinaryColor::Off));
    }

    #[test]
    fn test_outlined_mask_draws_halo() {
        let mut canvas = Small::new(BinaryColor::On);
        draw_mask_outlined(
            &mut canvas,
            &[0b1000_0000],
            Size::new(1, 1),
            Point::new(5, 5),
            BinaryColor::On,
            BinaryColor::Off,
        )
        .unwrap();

        assert_eq!(canvas.pixel(Point::new(5, 5)), Some(BinaryColor::On));
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dy != 0 {
                    let halo = Point::new(5 + dx, 5 + dy);
                    assert_eq!(canvas.pixel(halo), Some(BinaryColor::Off));
                }
            }
        }
        assert_eq!(canvas.pixel(Point::new(7, 5)), Some(BinaryColor::On));
    }

    #[test]
    fn test_glyphs_are_distinct() {
        let mut bt = Small::new(BinaryColor::Off);
        draw_connection_glyph(&mut bt, Point::zero(), true, BinaryColor::On).unwrap();
        let mut cross = Small::new(BinaryColor::Off);
        draw_connection_glyph(&mut cross, Point::zero(), false, BinaryColor::On).unwrap();

        // Top of the rune's spine
        assert_eq!(bt.pixel(Point::new(4, 0)), Some(BinaryColor::On));
        assert_eq!(cross.pixel(Point::new(4, 0)), Some(BinaryColor::Off));
        // Cross's top-left arm
        assert_eq!(cross.pixel(Point::new(1, 2)), Some(BinaryColor::On));
        assert_eq!(bt.pixel(Point::new(1, 2)), Some(BinaryColor::Off));
    }

    #[test]
    fn test_glyphs_fit_bounding_box() {
        for connected in [true, false] {
            let mut canvas = Small::new(BinaryColor::Off);
            draw_connection_glyph(&mut canvas, Point::zero(), connected, BinaryColor::On).unwrap();
            for y in 0..16 {
                for x in 0..16 {
                    if canvas.pixel(Point::new(x, y)) == Some(BinaryColor::On) {
                        assert!(x < GLYPH_SIZE.width as i32 && y < GLYPH_SIZE.height as i32);
                    }
                }
            }
        }
    }
}
