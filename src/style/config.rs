use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{PostlineError, PostlineResult};
use crate::layout::LayoutKind;
use crate::text::font::FontDescriptor;

/// Immutable style bundle for one composition request.
///
/// Every field has a default, so a JSON style file only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Distance from the canvas edges to the box or text column.
    pub margin: u32,
    /// Inner padding of the attribution box.
    pub padding: u32,
    /// Corner radius of the attribution box.
    pub corner_radius: u32,
    /// Vertical distance between headline baselines.
    pub line_height: u32,
    /// Advisory headline length; longer headlines are wrapped, never truncated.
    pub max_title_length: usize,

    /// Attribution box fill.
    pub box_fill: Rgba8,
    /// Headline color inside the box.
    pub text_color: Rgba8,
    /// Source attribution color inside the box.
    pub source_color: Rgba8,
    /// Brand color inside the box.
    pub brand_color: Rgba8,
    /// Full-canvas darkening scrim drawn under the box.
    pub overlay_color: Rgba8,

    /// Headline font.
    pub title_font: FontDescriptor,
    /// Source attribution font.
    pub source_font: FontDescriptor,
    /// Brand font.
    pub brand_font: FontDescriptor,

    /// Draw the source attribution.
    pub show_source: bool,
    /// Prefix of the source attribution (`"{label}: {source}"`).
    pub source_label: String,
    /// Draw the brand text when one is supplied.
    pub show_brand: bool,

    /// Height reserved at the bottom of the box for the attribution row.
    pub attribution_reserve: u32,
    /// Extra gap between the box bottom and the bottom margin.
    pub bottom_offset: u32,
    /// Distance from the inner bottom padding up to the attribution row.
    pub attribution_row_offset: u32,

    /// Gradient layout settings.
    pub gradient: GradientStyle,
    /// Layout identifier (`box` or `gradient`).
    pub layout: String,
    /// Output encoding settings.
    pub output: OutputConfig,
    /// Background acceptance and fallback settings.
    pub background: BackgroundConfig,
}

/// Settings for the bottom-gradient layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradientStyle {
    /// Height of the gradient band measured from the canvas bottom.
    pub height: u32,
    /// Band color; its alpha is the opacity reached at the bottom row.
    pub color: Rgba8,
    /// Exponent of the opacity curve; values below 1 ramp up quickly then level off.
    pub gamma: f32,
    /// Offset of the first headline line below the top of the band.
    pub text_inset: u32,
    /// Headline color over the band.
    pub text_color: Rgba8,
    /// Source color in the top-right corner.
    pub source_color: Rgba8,
    /// Brand color at the bottom-left.
    pub brand_color: Rgba8,
    /// Distance of the source text from the top and right edges.
    pub source_margin: u32,
}

/// Output encoding settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory used when a request has no explicit output path.
    pub dir: PathBuf,
    /// 0..=100; higher spends more time on PNG compression.
    pub quality: u8,
}

/// Background acceptance rules applied by [`crate::background_or_default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Smallest accepted background width.
    pub min_width: u32,
    /// Smallest accepted background height.
    pub min_height: u32,
    /// Flat color used when no acceptable background is available.
    pub fallback_color: Rgba8,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(1080, 1350),
            margin: 40,
            padding: 30,
            corner_radius: 20,
            line_height: 60,
            max_title_length: 150,
            box_fill: Rgba8::new(255, 255, 255, 240),
            text_color: Rgba8::new(0, 0, 0, 255),
            source_color: Rgba8::new(100, 100, 100, 255),
            brand_color: Rgba8::new(50, 50, 50, 255),
            overlay_color: Rgba8::new(0, 0, 0, 100),
            title_font: FontDescriptor::new(
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                48.0,
            )
            .with_weight(700),
            source_font: FontDescriptor::new(
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                24.0,
            ),
            brand_font: FontDescriptor::new(
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                24.0,
            ),
            show_source: true,
            source_label: "Sumber".to_string(),
            show_brand: true,
            attribution_reserve: 80,
            bottom_offset: 60,
            attribution_row_offset: 30,
            gradient: GradientStyle::default(),
            layout: LayoutKind::Box.as_str().to_string(),
            output: OutputConfig::default(),
            background: BackgroundConfig::default(),
        }
    }
}

impl Default for GradientStyle {
    fn default() -> Self {
        Self {
            height: 550,
            color: Rgba8::new(0, 0, 0, 220),
            gamma: 0.6,
            text_inset: 80,
            text_color: Rgba8::new(255, 255, 255, 255),
            source_color: Rgba8::new(255, 255, 255, 255),
            brand_color: Rgba8::new(255, 255, 255, 220),
            source_margin: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            quality: 95,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            min_width: 300,
            min_height: 300,
            fallback_color: Rgba8::new(0x1a, 0x1a, 0x1a, 255),
        }
    }
}

impl StyleConfig {
    /// Parse a style from JSON text.
    pub fn from_json_str(s: &str) -> PostlineResult<Self> {
        serde_json::from_str(s).map_err(|e| PostlineError::serde(e.to_string()))
    }

    /// Read and parse a JSON style file.
    pub fn from_path(path: &Path) -> PostlineResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read style file '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Configured layout identifier as a [`LayoutKind`].
    pub fn layout_kind(&self) -> PostlineResult<LayoutKind> {
        self.layout.parse()
    }

    /// Width available to box-layout headline text.
    pub fn box_text_width(&self) -> f32 {
        self.canvas.width as f32 - 2.0 * self.margin as f32 - 2.0 * self.padding as f32
    }

    /// Reject values the layouts cannot render.
    pub fn validate(&self) -> PostlineResult<()> {
        if self.canvas.is_empty() {
            return Err(PostlineError::configuration(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(PostlineError::configuration(
                "canvas dimensions must not exceed 65535",
            ));
        }
        if self.box_text_width() <= 0.0 {
            return Err(PostlineError::configuration(
                "margin and padding leave no room for headline text",
            ));
        }
        if self.line_height == 0 {
            return Err(PostlineError::configuration("line_height must be > 0"));
        }
        for (name, font) in [
            ("title_font", &self.title_font),
            ("source_font", &self.source_font),
            ("brand_font", &self.brand_font),
        ] {
            if !font.size_px.is_finite() || font.size_px <= 0.0 {
                return Err(PostlineError::configuration(format!(
                    "{name}.size_px must be finite and > 0"
                )));
            }
        }
        if !self.gradient.gamma.is_finite() || self.gradient.gamma <= 0.0 {
            return Err(PostlineError::configuration(
                "gradient.gamma must be finite and > 0",
            ));
        }
        if self.output.quality > 100 {
            return Err(PostlineError::configuration(
                "output.quality must be within 0..=100",
            ));
        }
        self.layout_kind()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
