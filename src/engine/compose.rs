use std::path::{Path, PathBuf};

use crate::assets::background::decode_background;
use crate::encode::png::{default_output_name, encode_png, write_png};
use crate::engine::warnings::CompositionWarning;
use crate::foundation::core::Raster;
use crate::foundation::error::{PostlineError, PostlineResult};
use crate::layout::{LayoutCx, LayoutFonts, LayoutKind, PostContent};
use crate::render::fit::fit_cover;
use crate::style::config::StyleConfig;
use crate::text::font::FontBook;
use crate::text::metrics::FontMeasure;
use crate::text::wrap::{WrappedText, wrap};

/// One post to compose.
#[derive(Clone, Debug)]
pub struct HeadlineRequest<'s> {
    background: image::RgbaImage,
    headline: String,
    source: Option<String>,
    brand: Option<String>,
    layout: Option<LayoutKind>,
    output_path: Option<PathBuf>,
    style: &'s StyleConfig,
}

impl<'s> HeadlineRequest<'s> {
    /// Request with a decoded background; the layout comes from `style` unless overridden.
    pub fn new(
        background: image::RgbaImage,
        headline: impl Into<String>,
        style: &'s StyleConfig,
    ) -> Self {
        Self {
            background,
            headline: headline.into(),
            source: None,
            brand: None,
            layout: None,
            output_path: None,
            style,
        }
    }

    /// Request with an encoded background, checked against `style.background`.
    pub fn from_encoded(
        bytes: &[u8],
        headline: impl Into<String>,
        style: &'s StyleConfig,
    ) -> PostlineResult<Self> {
        let background = decode_background(bytes, &style.background)?;
        Ok(Self::new(background, headline, style))
    }

    /// Set the source name shown in the attribution.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the brand text.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Override the style's layout.
    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set where [`CompositionResult::write`] puts the image.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

/// Finished post.
#[derive(Clone, Debug)]
pub struct CompositionResult {
    /// Flattened canvas-sized image.
    pub image: Raster,
    /// Requested output path, or `output.dir/post_{slug}.png`.
    pub output_path: PathBuf,
    /// Layout that produced the image.
    pub layout: LayoutKind,
    /// Headline as it was wrapped.
    pub lines: WrappedText,
    /// Non-fatal conditions met while composing.
    pub warnings: Vec<CompositionWarning>,
    quality: u8,
}

impl CompositionResult {
    /// PNG bytes at the style's output quality.
    pub fn encode_png(&self) -> PostlineResult<Vec<u8>> {
        encode_png(&self.image, self.quality)
    }

    /// Write the PNG to [`Self::output_path`].
    pub fn write(&self) -> PostlineResult<&Path> {
        write_png(&self.image, &self.output_path, self.quality)?;
        Ok(&self.output_path)
    }
}

/// Compose a post: cover-fit the background, wrap the headline, then run the layout.
#[tracing::instrument(skip_all, fields(layout))]
pub fn compose(req: HeadlineRequest<'_>) -> PostlineResult<CompositionResult> {
    let style = req.style;
    style.validate()?;
    let kind = match req.layout {
        Some(kind) => kind,
        None => style.layout_kind()?,
    };
    tracing::Span::current().record("layout", kind.as_str());

    let headline = req.headline.trim();
    if headline.is_empty() {
        return Err(PostlineError::configuration("headline must not be empty"));
    }
    let chars = headline.chars().count();
    if chars > style.max_title_length {
        tracing::info!(
            chars,
            max = style.max_title_length,
            "headline longer than max_title_length, wrapping anyway"
        );
    }

    let canvas = fit_cover(&req.background, style.canvas)?;

    let mut warnings = Vec::new();
    let mut book = FontBook::new();
    let fonts = LayoutFonts::load(&mut book, style, &mut warnings)?;
    let strategy = kind.strategy();

    let lines = wrap(
        headline,
        &mut FontMeasure::new(&mut book, &fonts.title),
        strategy.headline_width(style),
    );
    for &line in lines.overflowing() {
        let warning = CompositionWarning::LineOverflow {
            line,
            text: lines.lines()[line].clone(),
        };
        tracing::warn!(%warning, "headline word overflows");
        warnings.push(warning);
    }
    tracing::debug!(lines = lines.len(), "headline wrapped");

    let content = PostContent {
        headline: &lines,
        source: req.source.as_deref(),
        brand: req.brand.as_deref(),
    };
    let mut cx = LayoutCx {
        style,
        fonts: &fonts,
        book: &mut book,
        warnings: &mut warnings,
    };
    let image = strategy.render(canvas, &content, &mut cx)?;

    let output_path = req
        .output_path
        .unwrap_or_else(|| style.output.dir.join(default_output_name(headline)));

    Ok(CompositionResult {
        image,
        output_path,
        layout: kind,
        lines,
        warnings,
        quality: style.output.quality,
    })
}

/// [`compose`] and write the PNG to the request's output path.
pub fn render_to_file(req: HeadlineRequest<'_>) -> PostlineResult<CompositionResult> {
    let result = compose(req)?;
    let path = result.write()?;
    tracing::info!(path = %path.display(), warnings = result.warnings.len(), "post written");
    Ok(result)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/compose.rs"]
mod tests;
