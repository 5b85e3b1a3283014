//! Quarter-turn canvas rotation
//!
//! The nice!view panel is mounted sideways, so the status row is drawn
//! upright into a square canvas and then turned 90 degrees clockwise before
//! it reaches the frame buffer.
//!
//! A [`RotationTransform`] describes the turn the same way a canvas transform
//! in a graphics library does: a pivot and a post-rotation offset. Two scratch
//! strategies share the same transform:
//!
//! - [`Canvas::rotate`](super::Canvas::rotate) copies the fixed-size array on
//!   the stack and cannot fail.
//! - [`rotate_with_allocator`] sizes a heap scratch buffer from the grid's
//!   runtime dimensions and bails out before touching the grid if the
//!   allocation fails.

extern crate alloc;

use alloc::vec::Vec;
use embedded_graphics::prelude::*;

use super::PixelGrid;
use crate::error::StatusError;

/// Clockwise quarter turn about `pivot`, shifted by `offset` afterwards.
///
/// With screen coordinates (y down) a source point `p` lands at
/// `pivot + (-(p.y - pivot.y), p.x - pivot.x) + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTransform {
    pub pivot: Point,
    pub offset: Point,
}

impl RotationTransform {
    pub const fn new(pivot: Point, offset: Point) -> Self {
        Self { pivot, offset }
    }

    /// Turn about the grid centre with the offset that keeps every pixel of
    /// a square grid on the grid: `(x, y)` maps to `(height - 1 - y, x)`.
    ///
    /// Four applications restore the original contents exactly.
    pub fn lossless(width: usize, height: usize) -> Self {
        let pivot = Self::center(width, height);
        let offset = Point::new(height as i32 - 1 - pivot.x - pivot.y, pivot.x - pivot.y);
        Self::new(pivot, offset)
    }

    /// Turn about the integer grid centre with no offset.
    ///
    /// On an even-sized grid the integer centre sits half a pixel right of
    /// the true centre, so the result is shifted one column right: source
    /// row 0 falls off the right edge and column 0 keeps the fill colour.
    pub fn unshifted(width: usize, height: usize) -> Self {
        Self::new(Self::center(width, height), Point::zero())
    }

    pub fn map(&self, point: Point) -> Point {
        let rel = point - self.pivot;
        self.pivot + Point::new(-rel.y, rel.x) + self.offset
    }

    fn center(width: usize, height: usize) -> Point {
        Point::new((width / 2) as i32, (height / 2) as i32)
    }
}

/// Source of heap scratch buffers for [`rotate_with_allocator`].
pub trait ScratchAllocator<C> {
    /// Return a vector with capacity for at least `len` pixels. Any contents
    /// are discarded before use.
    fn allocate(&mut self, len: usize) -> Result<Vec<C>, StatusError>;
}

/// Allocates from the global allocator without aborting on exhaustion.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapScratch;

impl<C> ScratchAllocator<C> for HeapScratch {
    fn allocate(&mut self, len: usize) -> Result<Vec<C>, StatusError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| StatusError::ScratchAllocation { requested: len })?;
        Ok(buf)
    }
}

/// Rotate `grid` in place using a heap scratch buffer sized from the grid.
///
/// On allocation failure the grid is left exactly as it was and the error is
/// returned; nothing has been filled or written at that point.
pub fn rotate_with_allocator<G, A>(
    grid: &mut G,
    allocator: &mut A,
    transform: &RotationTransform,
    fill: G::Color,
) -> Result<(), StatusError>
where
    G: PixelGrid,
    A: ScratchAllocator<G::Color>,
{
    let width = grid.width();
    let height = grid.height();
    let len = width * height;

    let mut scratch = allocator.allocate(len)?;
    scratch.clear();
    if scratch.capacity() < len {
        return Err(StatusError::ScratchAllocation { requested: len });
    }

    for y in 0..height {
        for x in 0..width {
            if let Some(color) = grid.pixel(Point::new(x as i32, y as i32)) {
                scratch.push(color);
            }
        }
    }

    let source = scratch.iter().enumerate().map(|(i, &color)| {
        let point = Point::new((i % width) as i32, (i / width) as i32);
        Pixel(point, color)
    });
    scatter(grid, source, transform, fill);
    Ok(())
}

/// Fill `grid` and write every source pixel through `transform`.
pub(super) fn scatter<G, I>(grid: &mut G, source: I, transform: &RotationTransform, fill: G::Color)
where
    G: PixelGrid,
    I: IntoIterator<Item = Pixel<G::Color>>,
{
    grid.fill(fill);
    for Pixel(point, color) in source {
        grid.set_pixel(transform.map(point), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use embedded_graphics::pixelcolor::{BinaryColor, Gray8};

    const N: usize = 5;

    /// Every pixel gets a distinct grey so misplaced or altered pixels show up.
    fn numbered() -> Canvas<Gray8, N, N> {
        let mut canvas = Canvas::new(Gray8::new(0));
        for y in 0..N {
            for x in 0..N {
                canvas.set_pixel(
                    Point::new(x as i32, y as i32),
                    Gray8::new((1 + x + y * N) as u8),
                );
            }
        }
        canvas
    }

    struct FailingScratch;

    impl<C> ScratchAllocator<C> for FailingScratch {
        fn allocate(&mut self, len: usize) -> Result<Vec<C>, StatusError> {
            Err(StatusError::ScratchAllocation { requested: len })
        }
    }

    /// Hands out a recycled buffer that still holds pixels from a previous use.
    struct StaleScratch;

    impl ScratchAllocator<Gray8> for StaleScratch {
        fn allocate(&mut self, len: usize) -> Result<Vec<Gray8>, StatusError> {
            let mut buf = Vec::with_capacity(len + 3);
            buf.extend([Gray8::new(200); 3]);
            Ok(buf)
        }
    }

    /// Hands out a buffer with no capacity at all.
    struct ShortScratch;

    impl<C> ScratchAllocator<C> for ShortScratch {
        fn allocate(&mut self, _len: usize) -> Result<Vec<C>, StatusError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_lossless_maps_square_onto_itself() {
        let even = RotationTransform::lossless(68, 68);
        assert_eq!(even.pivot, Point::new(34, 34));
        assert_eq!(even.offset, Point::new(-1, 0));
        assert_eq!(even.map(Point::new(0, 0)), Point::new(67, 0));
        assert_eq!(even.map(Point::new(67, 67)), Point::new(0, 67));
        assert_eq!(even.map(Point::new(10, 3)), Point::new(64, 10));

        let odd = RotationTransform::lossless(5, 5);
        assert_eq!(odd.offset, Point::zero());
        assert_eq!(odd.map(Point::new(0, 0)), Point::new(4, 0));
    }

    #[test]
    fn test_single_turn_moves_pixels_without_changing_them() {
        let original = numbered();
        let mut rotated = original.clone();
        rotated.rotate(&RotationTransform::lossless(N, N), Gray8::new(0));

        for y in 0..N {
            for x in 0..N {
                let src = original.pixel(Point::new(x as i32, y as i32));
                let dst = rotated.pixel(Point::new((N - 1 - y) as i32, x as i32));
                assert_eq!(src, dst, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_four_turns_restore_original() {
        let original = numbered();
        let transform = RotationTransform::lossless(N, N);
        let mut canvas = original.clone();

        for _ in 0..4 {
            canvas.rotate(&transform, Gray8::new(0));
        }
        assert_eq!(canvas, original);
    }

    #[test]
    fn test_unshifted_turn_loses_one_column() {
        let mut canvas = Canvas::<BinaryColor, 4, 4>::new(BinaryColor::On);
        canvas.rotate(&RotationTransform::unshifted(4, 4), BinaryColor::Off);

        for y in 0..4 {
            assert_eq!(canvas.pixel(Point::new(0, y)), Some(BinaryColor::Off));
            for x in 1..4 {
                assert_eq!(canvas.pixel(Point::new(x, y)), Some(BinaryColor::On));
            }
        }
    }

    #[test]
    fn test_heap_rotation_matches_stack_rotation() {
        let transform = RotationTransform::lossless(N, N);

        let mut stack = numbered();
        stack.rotate(&transform, Gray8::new(0));

        let mut heap = numbered();
        rotate_with_allocator(&mut heap, &mut HeapScratch, &transform, Gray8::new(0)).unwrap();

        assert_eq!(heap, stack);
    }

    #[test]
    fn test_recycled_scratch_contents_are_ignored() {
        let transform = RotationTransform::lossless(N, N);

        let mut stack = numbered();
        stack.rotate(&transform, Gray8::new(0));

        let mut heap = numbered();
        rotate_with_allocator(&mut heap, &mut StaleScratch, &transform, Gray8::new(0)).unwrap();

        assert_eq!(heap, stack);
    }

    #[test]
    fn test_failed_allocation_leaves_canvas_untouched() {
        let original = numbered();
        let mut canvas = original.clone();

        let result = rotate_with_allocator(
            &mut canvas,
            &mut FailingScratch,
            &RotationTransform::lossless(N, N),
            Gray8::new(255),
        );

        assert_eq!(
            result,
            Err(StatusError::ScratchAllocation { requested: N * N })
        );
        assert_eq!(canvas, original);
    }

    #[test]
    fn test_undersized_scratch_is_rejected() {
        let original = numbered();
        let mut canvas = original.clone();

        let result = rotate_with_allocator(
            &mut canvas,
            &mut ShortScratch,
            &RotationTransform::lossless(N, N),
            Gray8::new(255),
        );

        assert!(result.is_err());
        assert_eq!(canvas, original);
    }
}
