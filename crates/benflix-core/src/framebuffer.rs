//! RAM framebuffer for the 160x68 panel with change detection.
//!
//! Widgets present into this buffer instead of the display. After a render
//! pass only the rectangle containing changed pixels is sent to the panel,
//! in one `fill_contiguous` call.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;
const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn full() -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: WIDTH - 1,
            max_y: HEIGHT - 1,
        }
    }

    fn area(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Panel-sized pixel buffer implementing `DrawTarget<Color = BinaryColor>`.
pub struct FrameBuffer {
    pixels: Vec<BinaryColor>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// A buffer filled with `fill`.
    ///
    /// The whole panel starts dirty so the first flush paints every pixel.
    pub fn new(fill: BinaryColor) -> Self {
        Self {
            pixels: vec![fill; PIXEL_COUNT],
            dirty: Some(DirtyRect::full()),
        }
    }

    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (x, y) = Self::index(point)?;
        Some(self.pixels[y * WIDTH + x])
    }

    /// Region the next flush will send, if any.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(|rect| rect.area())
    }

    /// Mark the whole panel for the next flush.
    pub fn invalidate(&mut self) {
        self.dirty = Some(DirtyRect::full());
    }

    fn index(point: Point) -> Option<(usize, usize)> {
        let (x, y) = (point.x, point.y);
        if x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Write a single pixel, expanding the dirty rect only if the colour changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: BinaryColor) {
        let idx = y * WIDTH + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Send the dirty region to `display`, then reset the dirty state.
    ///
    /// No-op when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let area = rect.area();
        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let width = area.size.width as usize;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * WIDTH + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some((x, y)) = Self::index(coord) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colours are consumed row-major over the unclipped area
        let colors = area.points().zip(colors);
        for (point, color) in colors {
            if let Some((x, y)) = Self::index(point) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };

        for y in clipped.top_left.y..=bottom_right.y {
            for x in clipped.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}
