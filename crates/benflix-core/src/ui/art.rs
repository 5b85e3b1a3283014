//! Decorative "reaction diffusion" art shown on the left of the panel
//!
//! 86x68, one bit per pixel, rows padded to whole bytes, most significant bit
//! first. Bit value is a palette index: 0 is black and 1 is white unless the
//! palette is inverted.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{BLACK, WHITE};

pub const ART_WIDTH: u32 = 86;
pub const ART_HEIGHT: u32 = 68;
const ART_STRIDE: usize = (ART_WIDTH as usize).div_ceil(8);

// one image row per line
#[rustfmt::skip]
pub static ART_DATA: [u8; ART_STRIDE * ART_HEIGHT as usize] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfc,
    0xff, 0xff, 0x9f, 0x9f, 0xff, 0xf1, 0xff, 0xff, 0xff, 0xff, 0xfc,
    0xff, 0xff, 0x1f, 0x8f, 0xff, 0xe1, 0xf9, 0xff, 0xff, 0xc7, 0xfc,
    0xff, 0xff, 0x0f, 0x0f, 0x1f, 0xc1, 0xf0, 0xff, 0x8f, 0x83, 0xfc,
    0xdf, 0xff, 0x0f, 0x0f, 0x0f, 0x83, 0xf0, 0xff, 0x07, 0x87, 0xfc,
    0x8f, 0xff, 0x0e, 0x0e, 0x0f, 0x83, 0xf0, 0xff, 0x07, 0x87, 0xfc,
    0x87, 0xff, 0x00, 0x1e, 0x1f, 0x07, 0xe0, 0x7f, 0x87, 0x07, 0xfc,
    0x83, 0xff, 0x00, 0x1e, 0x1f, 0x07, 0x80, 0x3f, 0x87, 0x07, 0xdc,
    0xc0, 0xfe, 0x00, 0x3c, 0x1e, 0x0f, 0x00, 0x0f, 0x07, 0x0f, 0x8c,
    0xc0, 0x00, 0x00, 0x7c, 0x1c, 0x1f, 0x00, 0x00, 0x07, 0x0f, 0x84,
    0xe0, 0x00, 0x00, 0xf0, 0x00, 0x1e, 0x0e, 0x00, 0x0f, 0x0f, 0x04,
    0xf0, 0x00, 0x3f, 0xe0, 0x00, 0x3e, 0x1f, 0x00, 0x0f, 0x07, 0x04,
    0xfc, 0x00, 0xff, 0xe0, 0x00, 0x3e, 0x1f, 0x00, 0x0f, 0x00, 0x0c,
    0xff, 0xc1, 0xff, 0xe0, 0xe0, 0x3c, 0x1e, 0x0f, 0x3f, 0x00, 0x0c,
    0xff, 0xff, 0xf0, 0xf3, 0xf8, 0x3c, 0x3e, 0x1f, 0xfe, 0x00, 0x1c,
    0xff, 0xff, 0xc0, 0x3f, 0xfc, 0x08, 0x3c, 0x1f, 0xfc, 0x00, 0x3c,
    0xf0, 0x3f, 0x80, 0x1f, 0xbe, 0x00, 0x3c, 0x1f, 0xf8, 0x0e, 0xfc,
    0xe0, 0x0f, 0x00, 0x0e, 0x1e, 0x00, 0x3c, 0x1f, 0x80, 0x3f, 0xfc,
    0xe0, 0x0f, 0x02, 0x0e, 0x0f, 0x00, 0x1e, 0x00, 0x00, 0x7f, 0xfc,
    0xf0, 0x07, 0x0f, 0x0e, 0x0f, 0xc0, 0x1f, 0x00, 0x00, 0xff, 0xfc,
    0xff, 0x07, 0x0f, 0x07, 0x07, 0xfe, 0x0f, 0x00, 0x03, 0xfc, 0x7c,
    0xff, 0x87, 0x0f, 0x87, 0x07, 0xff, 0x07, 0x80, 0x0f, 0xf0, 0x3c,
    0xff, 0x87, 0x07, 0x87, 0x81, 0xff, 0x07, 0x83, 0xff, 0xc0, 0x1c,
    0xff, 0x87, 0x87, 0x87, 0xc0, 0x0f, 0x87, 0x83, 0xff, 0x00, 0x3c,
    0xff, 0x07, 0x87, 0x87, 0xc0, 0x07, 0x87, 0x83, 0xfe, 0x00, 0x7c,
    0xf0, 0x07, 0x87, 0x87, 0xc0, 0x03, 0x83, 0x81, 0xf8, 0x03, 0xfc,
    0xe0, 0x0f, 0x87, 0x87, 0xc0, 0x03, 0xc3, 0xc0, 0xf0, 0x0f, 0xfc,
    0xe0, 0x0f, 0x87, 0x87, 0xc3, 0x83, 0xc3, 0xe0, 0x00, 0x3f, 0xfc,
    0xf0, 0x0f, 0x87, 0x87, 0xc3, 0xc3, 0xc3, 0xf0, 0x00, 0x7f, 0xcc,
    0xff, 0x0f, 0x87, 0x87, 0x83, 0xc3, 0xc1, 0xf8, 0x01, 0xff, 0x04,
    0xff, 0x0f, 0x07, 0x83, 0x83, 0xc3, 0xc0, 0xfe, 0x03, 0xfc, 0x04,
    0xff, 0x0f, 0x07, 0x80, 0x07, 0xc3, 0xc0, 0x3f, 0x9f, 0xe0, 0x04,
    0xff, 0x0f, 0x0f, 0x80, 0x07, 0x83, 0xc0, 0x0f, 0xff, 0x80, 0x0c,
    0xff, 0x0f, 0x0f, 0x00, 0x07, 0x87, 0x80, 0x03, 0xfe, 0x00, 0x3c,
    0xfe, 0x0e, 0x0e, 0x04, 0x0f, 0x07, 0x82, 0x01, 0xfc, 0x00, 0xfc,
    0xfe, 0x1e, 0x1e, 0x0f, 0xff, 0x07, 0x07, 0x80, 0xf8, 0x07, 0xfc,
    0xfc, 0x1e, 0x1e, 0x0f, 0xfe, 0x0f, 0x0f, 0xe0, 0x78, 0x3f, 0xfc,
    0xf8, 0x3e, 0x1e, 0x0f, 0xfc, 0x0f, 0x0f, 0xf0, 0x70, 0x7f, 0xfc,
    0xc0, 0x3e, 0x1e, 0x07, 0xf8, 0x1f, 0x07, 0xf8, 0x70, 0x7f, 0xfc,
    0x80, 0x3e, 0x1f, 0x00, 0x60, 0x3f, 0x00, 0x38, 0x38, 0x7c, 0xfc,
    0x80, 0x1e, 0x0f, 0x80, 0x00, 0x7e, 0x00, 0x3c, 0x38, 0x00, 0x7c,
    0x80, 0x1e, 0x07, 0xc0, 0x00, 0xfc, 0x00, 0x1c, 0x38, 0x00, 0x7c,
    0xde, 0x0f, 0x07, 0xf0, 0x01, 0xfc, 0x00, 0x3c, 0x3c, 0x00, 0x7c,
    0xff, 0x0f, 0x83, 0xfe, 0x01, 0xf8, 0x3e, 0x78, 0x3e, 0x00, 0xfc,
    0xff, 0x0f, 0xc1, 0xef, 0xe0, 0x00, 0x7f, 0xf8, 0x7f, 0x87, 0xfc,
    0xff, 0x07, 0xe0, 0x07, 0xf0, 0x00, 0x7f, 0xf0, 0x7f, 0xff, 0xfc,
    0xfe, 0x03, 0xe0, 0x07, 0xf0, 0x00, 0x7c, 0x60, 0xff, 0xff, 0xfc,
    0xe0, 0x01, 0xe0, 0x07, 0xf0, 0x00, 0x78, 0x01, 0xe1, 0xff, 0xfc,
    0xc0, 0x00, 0xc0, 0x07, 0xe0, 0x70, 0x38, 0x03, 0xc0, 0x00, 0x7c,
    0x80, 0x20, 0x01, 0xff, 0x81, 0xf8, 0x38, 0x03, 0xc0, 0x00, 0x7c,
    0x80, 0x78, 0x03, 0xf8, 0x01, 0xfc, 0x1c, 0x03, 0xc0, 0x00, 0x3c,
    0xc0, 0x7c, 0x07, 0xf0, 0x00, 0xfe, 0x0f, 0x83, 0xc0, 0x0e, 0x3c,
    0xf8, 0x7e, 0x0f, 0xc0, 0x00, 0x7e, 0x0f, 0xc1, 0xe1, 0xff, 0x7c,
    0xf8, 0x3e, 0x0f, 0x80, 0x00, 0x1f, 0x07, 0xc1, 0xe1, 0xff, 0xfc,
    0xfc, 0x3e, 0x0f, 0x01, 0xf8, 0x0f, 0x87, 0xe0, 0xe0, 0xff, 0xfc,
    0xfc, 0x1e, 0x0e, 0x07, 0xfc, 0x07, 0x83, 0xe0, 0xe0, 0x7f, 0xfc,
    0xfc, 0x1e, 0x0e, 0x0f, 0xfe, 0x07, 0x83, 0xe0, 0xf0, 0x06, 0x0c,
    0xfe, 0x0e, 0x0e, 0x0f, 0xff, 0x83, 0xc3, 0xe0, 0xf0, 0x00, 0x0c,
    0xfe, 0x0f, 0x0f, 0x0e, 0x0f, 0x83, 0xc1, 0xc0, 0xf8, 0x00, 0x04,
    0xff, 0x0f, 0x0f, 0x00, 0x07, 0xc1, 0xc0, 0x81, 0xff, 0x00, 0x0c,
    0xff, 0x0f, 0x07, 0x80, 0x03, 0xc1, 0xe0, 0x03, 0xff, 0xe0, 0x3c,
    0xff, 0x07, 0x07, 0x80, 0x03, 0xe1, 0xe0, 0x07, 0xff, 0xff, 0xfc,
    0xff, 0x07, 0x87, 0x81, 0x83, 0xe1, 0xf0, 0x0f, 0xff, 0xff, 0xfc,
    0xff, 0x87, 0x87, 0xc3, 0xc7, 0xe0, 0xf8, 0x3f, 0xff, 0xff, 0xfc,
    0xff, 0x87, 0xcf, 0xe7, 0xcf, 0xe1, 0xf8, 0x3f, 0xff, 0xff, 0xfc,
    0xff, 0xcf, 0xff, 0xff, 0xff, 0xf3, 0xfc, 0x7f, 0xff, 0xff, 0xfc,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfc,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfc,
];

/// Colours for palette index 0 and 1.
pub const fn art_palette(inverted: bool) -> [BinaryColor; 2] {
    if inverted {
        [WHITE, BLACK]
    } else {
        [BLACK, WHITE]
    }
}

/// Palette index of the art pixel at (`x`, `y`).
pub fn art_index(x: u32, y: u32) -> usize {
    let byte = ART_DATA[y as usize * ART_STRIDE + x as usize / 8];
    ((byte >> (7 - (x % 8))) & 1) as usize
}

/// Draw the art with its top-left corner at `origin`.
pub fn draw_art<D>(target: &mut D, origin: Point, inverted: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let palette = art_palette(inverted);
    let area = Rectangle::new(origin, Size::new(ART_WIDTH, ART_HEIGHT));
    let colors = (0..ART_HEIGHT).flat_map(|y| art_row(y, palette));
    target.fill_contiguous(&area, colors)
}

fn art_row(y: u32, palette: [BinaryColor; 2]) -> impl Iterator<Item = BinaryColor> {
    (0..ART_WIDTH).map(move |x| palette[art_index(x, y)])
}
