//! Region layout and text rendering on an `embedded-graphics` draw target

use embedded_graphics::{
    mono_font::{iso_8859_1::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use super::{Region, RenderSink};
use crate::Error;

/// Heights of the time, date, counter and battery regions
const REGION_HEIGHTS: [u32; 4] = [50, 28, 28, 32];

/// Extra top inset on round displays
const ROUND_INSET: i32 = 8;

const BACKGROUND_COLOR: Rgb565 = Rgb565::WHITE;
const TEXT_COLOR: Rgb565 = Rgb565::BLACK;

/// Display shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    #[default]
    Rectangular,
    Round,
}

/// Screen areas of the regions, stacked top to bottom and centered vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    regions: [Rectangle; 4],
}

impl Layout {
    pub fn new(size: Size, shape: Shape) -> Self {
        let total: u32 = REGION_HEIGHTS.iter().sum();
        let mut top = (size.height.saturating_sub(total) / 2) as i32;
        if shape == Shape::Round {
            top += ROUND_INSET;
        }

        let mut regions = [Rectangle::zero(); 4];
        for (area, height) in regions.iter_mut().zip(REGION_HEIGHTS) {
            *area = Rectangle::new(Point::new(0, top), Size::new(size.width, height));
            top += height as i32;
        }
        Self { regions }
    }

    /// Screen area of `region`
    pub fn area(&self, region: Region) -> Rectangle {
        self.regions[region as usize]
    }
}

/// Render sink drawing each region as centered text on a display
pub struct Canvas<D> {
    display: D,
    layout: Layout,
}

impl<D> Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Create canvas covering the whole display
    pub fn new(display: D, shape: Shape) -> Self {
        let layout = Layout::new(display.bounding_box().size, shape);
        Self { display, layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Release the display
    pub fn into_inner(self) -> D {
        self.display
    }

    /// Clear the whole display
    pub fn clear(&mut self) -> Result<(), Error> {
        self.display
            .clear(BACKGROUND_COLOR)
            .map_err(|_| Error::Render)
    }

    fn font(region: Region) -> &'static MonoFont<'static> {
        match region {
            Region::Time => &PROFONT_24_POINT,
            Region::Date | Region::Counter | Region::Battery => &FONT_10X20,
        }
    }
}

impl<D> RenderSink for Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn render(&mut self, region: Region, text: &str) -> Result<(), Error> {
        let area = self.layout.area(region);

        // Overwrite previous text
        area.into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
            .draw(&mut self.display)
            .map_err(|_| Error::Render)?;

        let character_style = MonoTextStyle::new(Self::font(region), TEXT_COLOR);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(text, area.center(), character_style, text_style)
            .draw(&mut self.display)
            .map_err(|_| Error::Render)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn mock_display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_out_of_bounds_drawing(true);
        display.set_allow_overdraw(true);
        display
    }

    #[test]
    fn layout_is_centered_on_pinetime_screen() {
        let layout = Layout::new(Size::new(240, 240), Shape::Rectangular);
        assert_eq!(
            layout.area(Region::Time),
            Rectangle::new(Point::new(0, 51), Size::new(240, 50))
        );
        assert_eq!(layout.area(Region::Date).top_left, Point::new(0, 101));
        assert_eq!(layout.area(Region::Counter).top_left, Point::new(0, 129));
        assert_eq!(
            layout.area(Region::Battery),
            Rectangle::new(Point::new(0, 157), Size::new(240, 32))
        );
    }

    #[test]
    fn round_layout_is_inset() {
        let rect = Layout::new(Size::new(240, 240), Shape::Rectangular);
        let round = Layout::new(Size::new(240, 240), Shape::Round);
        for region in Region::ALL {
            assert_eq!(
                round.area(region).top_left,
                rect.area(region).top_left + Point::new(0, ROUND_INSET)
            );
        }
    }

    #[test]
    fn small_screen_starts_at_top() {
        let layout = Layout::new(Size::new(64, 64), Shape::Rectangular);
        assert_eq!(layout.area(Region::Time).top_left, Point::zero());
    }

    #[test]
    fn render_draws_text_inside_region() {
        let mut canvas = Canvas::new(mock_display(), Shape::Rectangular);
        canvas.render(Region::Time, "12:34").unwrap();

        let display = canvas.display();
        // Background fill reaches the region corner, text stays in the middle
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(BACKGROUND_COLOR));
        let area = Rectangle::new(Point::zero(), Size::new(64, 50));
        assert!(area
            .points()
            .any(|p| display.get_pixel(p) == Some(TEXT_COLOR)));
        // Nothing drawn below the time region
        assert_eq!(display.get_pixel(Point::new(0, 55)), None);
    }

    struct Broken;

    impl OriginDimensions for Broken {
        fn size(&self) -> Size {
            Size::new(240, 240)
        }
    }

    impl DrawTarget for Broken {
        type Color = Rgb565;
        type Error = ();

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Err(())
        }
    }

    #[test]
    fn draw_failure_is_reported() {
        let mut canvas = Canvas::new(Broken, Shape::Rectangular);
        assert_eq!(canvas.render(Region::Date, "2024-03-03"), Err(Error::Render));
        assert_eq!(canvas.clear(), Err(Error::Render));
    }
}
