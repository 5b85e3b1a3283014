//! Draw descriptors
//!
//! Small constructors for the embedded-graphics styles used by the status
//! canvas: labels, filled rectangles, lines and arcs.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use embedded_layout::prelude::{Align, horizontal, vertical};

/// Character style plus alignment for a text label.
///
/// Labels are laid out from their top edge so a label box's `top_left.y` is
/// the first pixel row of the glyphs.
#[derive(Debug, Clone, Copy)]
pub struct LabelStyle<'a, C: PixelColor> {
    pub character_style: MonoTextStyle<'a, C>,
    pub alignment: Alignment,
}

impl<'a, C: PixelColor> LabelStyle<'a, C> {
    fn text_style() -> TextStyle {
        TextStyleBuilder::new()
            .alignment(Alignment::Left)
            .baseline(Baseline::Top)
            .build()
    }

    /// Draw `text` with its top-left corner at `position`.
    pub fn draw_at<D>(&self, target: &mut D, text: &str, position: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        Text::with_text_style(text, position, self.character_style, Self::text_style())
            .draw(target)?;
        Ok(())
    }

    /// Draw `text` inside `area`, aligned horizontally per `self.alignment`
    /// and flush with the top of `area`.
    pub fn draw_in<D>(&self, target: &mut D, text: &str, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let label = Text::with_text_style(
            text,
            Point::zero(),
            self.character_style,
            Self::text_style(),
        );
        let label = match self.alignment {
            Alignment::Left => label.align_to(area, horizontal::Left, vertical::Top),
            Alignment::Center => label.align_to(area, horizontal::Center, vertical::Top),
            Alignment::Right => label.align_to(area, horizontal::Right, vertical::Top),
        };
        label.draw(target)?;
        Ok(())
    }
}

pub fn label_style<'a, C: PixelColor>(
    color: C,
    font: &'a MonoFont<'a>,
    alignment: Alignment,
) -> LabelStyle<'a, C> {
    LabelStyle {
        character_style: MonoTextStyle::new(font, color),
        alignment,
    }
}

/// Filled rectangle with no border.
pub fn rect_style<C: PixelColor>(bg_color: C) -> PrimitiveStyle<C> {
    PrimitiveStyle::with_fill(bg_color)
}

pub fn line_style<C: PixelColor>(color: C, width: u8) -> PrimitiveStyle<C> {
    PrimitiveStyle::with_stroke(color, width as u32)
}

/// Arc stroke centred on the arc's path.
pub fn arc_style<C: PixelColor>(color: C, width: u8) -> PrimitiveStyle<C> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(width as u32)
        .stroke_alignment(StrokeAlignment::Center)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelGrid};
    use embedded_graphics::geometry::Angle;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::primitives::{Arc, Line};

    type Small = Canvas<BinaryColor, 32, 16>;

    fn lit_columns(canvas: &Small) -> (i32, i32) {
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for y in 0..16 {
            for x in 0..32 {
                if canvas.pixel(Point::new(x, y)) == Some(BinaryColor::On) {
                    min = min.min(x);
                    max = max.max(x);
                }
            }
        }
        (min, max)
    }

    #[test]
    fn test_rect_and_line_styles() {
        let fill = rect_style(BinaryColor::On);
        assert_eq!(fill.fill_color, Some(BinaryColor::On));
        assert_eq!(fill.stroke_color, None);

        let line = line_style(BinaryColor::Off, 2);
        assert_eq!(line.stroke_color, Some(BinaryColor::Off));
        assert_eq!(line.stroke_width, 2);
        assert_eq!(line.fill_color, None);
    }

    #[test]
    fn test_arc_style_draws_stroke_only() {
        let style = arc_style(BinaryColor::On, 1);
        assert_eq!(style.stroke_alignment, StrokeAlignment::Center);

        let mut canvas = Small::new(BinaryColor::Off);
        Arc::new(
            Point::new(2, 2),
            12,
            Angle::from_degrees(0.0),
            Angle::from_degrees(360.0),
        )
        .into_styled(style)
        .draw(&mut canvas)
        .unwrap();

        // Ring is drawn, centre stays empty
        assert_eq!(canvas.pixel(Point::new(8, 8)), Some(BinaryColor::Off));
        assert!(canvas.rows().iter().flatten().any(|c| *c == BinaryColor::On));
    }

    #[test]
    fn test_line_style_draws_endpoints() {
        let mut canvas = Small::new(BinaryColor::Off);
        Line::new(Point::new(1, 1), Point::new(5, 1))
            .into_styled(line_style(BinaryColor::On, 1))
            .draw(&mut canvas)
            .unwrap();

        assert_eq!(canvas.pixel(Point::new(1, 1)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(5, 1)), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(Point::new(6, 1)), Some(BinaryColor::Off));
    }

    #[test]
    fn test_label_alignment_within_area() {
        let area = Rectangle::new(Point::zero(), Size::new(32, 16));

        let mut left = Small::new(BinaryColor::Off);
        label_style(BinaryColor::On, &FONT_6X10, Alignment::Left)
            .draw_in(&mut left, "II", &area)
            .unwrap();
        let mut right = Small::new(BinaryColor::Off);
        label_style(BinaryColor::On, &FONT_6X10, Alignment::Right)
            .draw_in(&mut right, "II", &area)
            .unwrap();
        let mut center = Small::new(BinaryColor::Off);
        label_style(BinaryColor::On, &FONT_6X10, Alignment::Center)
            .draw_in(&mut center, "II", &area)
            .unwrap();

        let (left_min, _) = lit_columns(&left);
        let (_, right_max) = lit_columns(&right);
        let (center_min, center_max) = lit_columns(&center);

        assert!(left_min < 6);
        assert!(right_max >= 26);
        assert!(center_min > left_min && center_max < right_max);
    }
}
