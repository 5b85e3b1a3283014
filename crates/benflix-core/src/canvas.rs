//! Fixed-size pixel canvas
//!
//! A [`Canvas`] is the in-memory buffer the status row is drawn into before
//! it is rotated and copied to the frame buffer. The size is known at compile
//! time, so the canvas and any scratch copy of it live on the stack.

pub mod rotate;

use core::convert::Infallible;

use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

pub use rotate::{HeapScratch, RotationTransform, ScratchAllocator, rotate_with_allocator};

/// Random access to a rectangular grid of pixels.
///
/// Implemented by [`Canvas`]; the heap rotation path only needs this trait so
/// it can size its scratch from the runtime dimensions.
pub trait PixelGrid {
    type Color: PixelColor;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Read a pixel, `None` when `point` is outside the grid.
    fn pixel(&self, point: Point) -> Option<Self::Color>;

    /// Write a pixel. Points outside the grid are ignored.
    fn set_pixel(&mut self, point: Point, color: Self::Color);

    fn fill(&mut self, color: Self::Color);
}

/// `W` x `H` pixel buffer implementing `DrawTarget`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas<C: PixelColor, const W: usize, const H: usize> {
    pixels: [[C; W]; H],
}

impl<C: PixelColor, const W: usize, const H: usize> Canvas<C, W, H> {
    pub fn new(fill: C) -> Self {
        Self {
            pixels: [[fill; W]; H],
        }
    }

    /// Rows of the canvas, top to bottom.
    pub fn rows(&self) -> &[[C; W]; H] {
        &self.pixels
    }

    /// Rotate the canvas in place a quarter turn clockwise.
    ///
    /// The current contents are copied into a scratch array on the stack, the
    /// canvas is filled with `fill`, and every scratch pixel is written back
    /// through `transform`. Pixels that land outside the canvas are dropped.
    pub fn rotate(&mut self, transform: &RotationTransform, fill: C) {
        let scratch = self.pixels;
        let source = scratch.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &color)| Pixel(Point::new(x as i32, y as i32), color))
        });
        rotate::scatter(self, source, transform, fill);
    }

    fn index(point: Point) -> Option<(usize, usize)> {
        if point.x >= 0 && point.y >= 0 && (point.x as usize) < W && (point.y as usize) < H {
            Some((point.x as usize, point.y as usize))
        } else {
            None
        }
    }
}

impl<C: PixelColor, const W: usize, const H: usize> PixelGrid for Canvas<C, W, H> {
    type Color = C;

    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn pixel(&self, point: Point) -> Option<C> {
        Self::index(point).map(|(x, y)| self.pixels[y][x])
    }

    #[inline]
    fn set_pixel(&mut self, point: Point, color: C) {
        if let Some((x, y)) = Self::index(point) {
            self.pixels[y][x] = color;
        }
    }

    fn fill(&mut self, color: C) {
        for row in self.pixels.iter_mut() {
            row.fill(color);
        }
    }
}

impl<C: PixelColor, const W: usize, const H: usize> OriginDimensions for Canvas<C, W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<C: PixelColor, const W: usize, const H: usize> DrawTarget for Canvas<C, W, H> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            PixelGrid::set_pixel(self, point, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            let row = &mut self.pixels[y as usize];
            row[area.top_left.x as usize..=bottom_right.x as usize].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        PixelGrid::fill(self, color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::BinaryColor;

    #[test]
    fn test_out_of_bounds_writes_are_dropped() {
        let mut canvas = Canvas::<BinaryColor, 4, 4>::new(BinaryColor::Off);
        canvas
            .draw_iter([
                Pixel(Point::new(-1, 0), BinaryColor::On),
                Pixel(Point::new(4, 0), BinaryColor::On),
                Pixel(Point::new(0, 4), BinaryColor::On),
                Pixel(Point::new(3, 3), BinaryColor::On),
            ])
            .unwrap();

        let lit: usize = canvas
            .rows()
            .iter()
            .flatten()
            .filter(|c| **c == BinaryColor::On)
            .count();
        assert_eq!(lit, 1);
        assert_eq!(canvas.pixel(Point::new(3, 3)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(4, 3)), None);
    }

    #[test]
    fn test_fill_solid_clips_to_canvas() {
        let mut canvas = Canvas::<BinaryColor, 4, 4>::new(BinaryColor::Off);
        canvas
            .fill_solid(
                &Rectangle::new(Point::new(2, -1), Size::new(10, 2)),
                BinaryColor::On,
            )
            .unwrap();

        assert_eq!(canvas.pixel(Point::new(2, 0)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(3, 0)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(1, 0)), Some(BinaryColor::Off));
        assert_eq!(canvas.pixel(Point::new(2, 1)), Some(BinaryColor::Off));
    }

    #[test]
    fn test_fill_solid_outside_is_noop() {
        let mut canvas = Canvas::<BinaryColor, 4, 4>::new(BinaryColor::Off);
        canvas
            .fill_solid(
                &Rectangle::new(Point::new(10, 10), Size::new(3, 3)),
                BinaryColor::On,
            )
            .unwrap();
        assert_eq!(canvas, Canvas::new(BinaryColor::Off));
    }
}
