use crate::text::font::{FontBook, LoadedFont};

/// Source of rendered text widths for line wrapping and alignment.
pub trait TextMeasure {
    /// Pixel advance width of `text` laid out on a single line.
    fn measure(&mut self, text: &str) -> f32;
}

/// Measures with a font registered in a [`FontBook`]; no drawable surface is involved.
pub struct FontMeasure<'a> {
    book: &'a mut FontBook,
    font: &'a LoadedFont,
}

impl<'a> FontMeasure<'a> {
    /// Measure with `font` through `book`.
    pub fn new(book: &'a mut FontBook, font: &'a LoadedFont) -> Self {
        Self { book, font }
    }
}

impl TextMeasure for FontMeasure<'_> {
    fn measure(&mut self, text: &str) -> f32 {
        self.book.measure(text, self.font)
    }
}

/// Every character advances by the same amount.
///
/// Handy for layout math that must not depend on font files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance per character in pixels.
    pub advance_px: f32,
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance_px
    }
}
