//! Postline composes headline posts for social media.
//!
//! A post is a background photo cover-fitted to a fixed canvas, a greedily wrapped headline,
//! and a source/brand attribution, arranged by one of two layouts:
//!
//! - [`LayoutKind::Box`]: darkened photo with a rounded panel holding the text
//! - [`LayoutKind::Gradient`]: bottom gradient band with light text over the photo
//!
//! Build a [`HeadlineRequest`] against a [`StyleConfig`] and pass it to [`compose`]; the
//! returned [`CompositionResult`] holds the finished image, non-fatal
//! [`CompositionWarning`]s, and can write itself as PNG.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Background decoding and fallback.
pub mod assets;
/// Output encoding.
pub mod encode;
/// Request orchestration.
pub mod engine;
/// Layout strategies.
pub mod layout;
/// Rasterization and compositing.
pub mod render;
/// Style configuration.
pub mod style;
/// Fonts, measurement and wrapping.
pub mod text;

pub use crate::foundation::core::{Canvas, Point, Raster, Rect, Rgba8};
pub use crate::foundation::error::{PostlineError, PostlineResult};

pub use crate::assets::background::{
    MAX_BACKGROUND_CANDIDATES, background_or_default, decode_background, default_background,
};
pub use crate::encode::png::{default_output_name, encode_png, write_png};
pub use crate::engine::compose::{CompositionResult, HeadlineRequest, compose, render_to_file};
pub use crate::engine::warnings::CompositionWarning;
pub use crate::layout::{
    BoxAttribution, GradientOverlay, LayoutCx, LayoutFonts, LayoutKind, LayoutStrategy,
    PostContent,
};
pub use crate::render::fit::fit_cover;
pub use crate::style::config::{BackgroundConfig, GradientStyle, OutputConfig, StyleConfig};
pub use crate::text::font::{FontBook, FontDescriptor, FontOrigin, FontRole, LoadedFont};
pub use crate::text::metrics::{FixedAdvance, FontMeasure, TextMeasure};
pub use crate::text::wrap::{WrappedText, wrap};
