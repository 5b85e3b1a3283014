//! The status widget: one display's render state plus its canvas.
//!
//! Listeners push new state into a widget through [`StatusWidget::update`],
//! which repaints and rotates the canvas straight away. The display manager
//! later copies dirty widgets into the frame buffer with
//! [`StatusWidget::present`].

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, warn};

use crate::canvas::{
    Canvas, HeapScratch, RotationTransform, ScratchAllocator, rotate_with_allocator,
};
use crate::config::{ScratchStrategy, StatusConfig};
use crate::ui::art::draw_art;
use crate::ui::{CANVAS_SIZE, DISPLAY_WIDTH_PX, draw_status};

/// Dirty tracking shared by everything the display manager presents.
pub trait Widget {
    fn is_dirty(&self) -> bool;
    fn mark_clean(&mut self);
    fn mark_dirty(&mut self);
}

/// What the status canvas shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusState {
    /// Charge level in percent, 0-100 as reported by the host
    pub battery: u8,
    pub charging: bool,
    /// Peripheral half is connected to the central
    pub connected: bool,
}

pub type StatusCanvas = Canvas<BinaryColor, CANVAS_SIZE, CANVAS_SIZE>;

/// Offset of the rotated canvas from the widget origin: right edge of the panel.
pub const CANVAS_OFFSET: Point = Point::new(DISPLAY_WIDTH_PX as i32 - CANVAS_SIZE as i32, 0);

pub struct StatusWidget {
    canvas: StatusCanvas,
    origin: Point,
    state: StatusState,
    dirty: bool,
}

impl StatusWidget {
    /// A blank widget whose panel area starts at `origin`.
    pub fn new(origin: Point, config: &StatusConfig) -> Self {
        Self {
            canvas: Canvas::new(config.palette().background),
            origin,
            state: StatusState::default(),
            dirty: true,
        }
    }

    pub fn state(&self) -> StatusState {
        self.state
    }

    /// The canvas as it will be presented: rotated.
    pub fn canvas(&self) -> &StatusCanvas {
        &self.canvas
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Panel area covered by this widget.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            self.origin,
            Size::new(
                CANVAS_OFFSET.x as u32 + CANVAS_SIZE as u32,
                CANVAS_SIZE as u32,
            ),
        )
    }

    /// Change the render state with `f`, then repaint.
    pub fn update<F>(&mut self, config: &StatusConfig, f: F)
    where
        F: FnOnce(&mut StatusState),
    {
        f(&mut self.state);
        self.redraw(config);
    }

    /// Repaint and rotate the canvas from the current state.
    pub fn redraw(&mut self, config: &StatusConfig) {
        self.redraw_with(config, &mut HeapScratch);
    }

    /// Like [`redraw`](Self::redraw), with the heap scratch coming from
    /// `allocator` when the config asks for heap rotation.
    ///
    /// A failed allocation leaves the canvas drawn but unrotated.
    pub fn redraw_with<A>(&mut self, config: &StatusConfig, allocator: &mut A)
    where
        A: ScratchAllocator<BinaryColor>,
    {
        let Ok(()) = draw_status(&mut self.canvas, &self.state, config);

        let background = config.palette().background;
        let transform = RotationTransform::lossless(CANVAS_SIZE, CANVAS_SIZE);
        match config.scratch {
            ScratchStrategy::Stack => self.canvas.rotate(&transform, background),
            ScratchStrategy::Heap => {
                if let Err(e) =
                    rotate_with_allocator(&mut self.canvas, allocator, &transform, background)
                {
                    warn!("Skipping status canvas rotation: {}", e);
                }
            }
        }

        debug!("Redrew status widget: {:?}", self.state);
        self.dirty = true;
    }

    /// Draw the decorative art and the rotated canvas onto `target`.
    pub fn present<D>(&self, target: &mut D, config: &StatusConfig) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        draw_art(target, self.origin, config.inverted)?;

        let area = Rectangle::new(
            self.origin + CANVAS_OFFSET,
            Size::new(CANVAS_SIZE as u32, CANVAS_SIZE as u32),
        );
        target.fill_contiguous(&area, self.canvas.rows().iter().flatten().copied())
    }
}

impl Widget for StatusWidget {
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
