//! Layout strategies: where the headline, attribution and decorations go on the fitted canvas.

use crate::engine::warnings::CompositionWarning;
use crate::foundation::core::Raster;
use crate::foundation::error::{PostlineError, PostlineResult};
use crate::style::config::StyleConfig;
use crate::text::font::{FontBook, FontDescriptor, FontRole, LoadedFont};
use crate::text::wrap::WrappedText;

/// Rounded panel layout.
pub mod boxed;
/// Bottom gradient layout.
pub mod gradient;

pub use boxed::BoxAttribution;
pub use gradient::GradientOverlay;

/// Selectable layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Rounded panel holding the headline with an attribution row beneath it.
    Box,
    /// Bottom gradient scrim with the headline drawn directly over the photo.
    Gradient,
}

impl LayoutKind {
    /// Every layout, in listing order.
    pub const ALL: [LayoutKind; 2] = [LayoutKind::Box, LayoutKind::Gradient];

    /// Canonical identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Gradient => "gradient",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Box => "White Box (Classic)",
            Self::Gradient => "Modern Gradient",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Box => "Darkened photo with a rounded white panel; source and brand under the headline",
            Self::Gradient => "Bottom gradient with white headline; source top-right, brand bottom-left",
        }
    }

    /// Strategy implementing this layout.
    pub fn strategy(self) -> Box<dyn LayoutStrategy> {
        match self {
            Self::Box => Box::new(BoxAttribution),
            Self::Gradient => Box::new(GradientOverlay),
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayoutKind {
    type Err = PostlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" | "layout1" | "white_box" => Ok(Self::Box),
            "gradient" | "layout2" | "modern_gradient" => Ok(Self::Gradient),
            other => Err(PostlineError::configuration(format!(
                "unknown layout '{other}' (expected 'box' or 'gradient')"
            ))),
        }
    }
}

/// Text content placed by a layout.
#[derive(Clone, Copy, Debug)]
pub struct PostContent<'a> {
    /// Headline already wrapped to [`LayoutStrategy::headline_width`].
    pub headline: &'a WrappedText,
    /// Source name, without the label prefix.
    pub source: Option<&'a str>,
    /// Brand text.
    pub brand: Option<&'a str>,
}

impl PostContent<'_> {
    /// `"{label}: {source}"` when the style shows sources and a non-blank source is present.
    pub fn source_text(&self, style: &StyleConfig) -> Option<String> {
        if !style.show_source {
            return None;
        }
        let source = self.source.map(str::trim).filter(|s| !s.is_empty())?;
        Some(format!("{}: {source}", style.source_label))
    }

    /// Brand text when the style shows brands and a non-blank brand is present.
    pub fn brand_text(&self, style: &StyleConfig) -> Option<&str> {
        if !style.show_brand {
            return None;
        }
        self.brand.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Fonts for the three text roles of a post.
#[derive(Debug)]
pub struct LayoutFonts {
    /// Headline font.
    pub title: LoadedFont,
    /// Source attribution font.
    pub source: LoadedFont,
    /// Brand font.
    pub brand: LoadedFont,
}

impl LayoutFonts {
    /// Resolve the style's font descriptors, recording a warning for each fallback.
    pub fn load(
        book: &mut FontBook,
        style: &StyleConfig,
        warnings: &mut Vec<CompositionWarning>,
    ) -> PostlineResult<Self> {
        let mut load = |role: FontRole, desc: &FontDescriptor| -> PostlineResult<LoadedFont> {
            let font = book.load(role, desc)?;
            if font.is_fallback() {
                warnings.push(CompositionWarning::FontFallback {
                    role,
                    requested: font.requested().to_string(),
                });
            }
            Ok(font)
        };
        Ok(Self {
            title: load(FontRole::Title, &style.title_font)?,
            source: load(FontRole::Source, &style.source_font)?,
            brand: load(FontRole::Brand, &style.brand_font)?,
        })
    }
}

/// Mutable per-request state handed to a layout.
pub struct LayoutCx<'a> {
    /// Request style.
    pub style: &'a StyleConfig,
    /// Resolved fonts.
    pub fonts: &'a LayoutFonts,
    /// Text shaping context.
    pub book: &'a mut FontBook,
    /// Non-fatal conditions found while laying out.
    pub warnings: &'a mut Vec<CompositionWarning>,
}

/// A way of arranging a post on top of the fitted background.
pub trait LayoutStrategy: Send + Sync {
    /// Which layout this is.
    fn kind(&self) -> LayoutKind;

    /// Pixel width the headline must be wrapped to.
    fn headline_width(&self, style: &StyleConfig) -> f32;

    /// Draw `content` onto `canvas` and return the flattened result.
    fn render(
        &self,
        canvas: Raster,
        content: &PostContent<'_>,
        cx: &mut LayoutCx<'_>,
    ) -> PostlineResult<Raster>;
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mod.rs"]
mod tests;
