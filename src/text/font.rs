use std::borrow::Cow;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PostlineError, PostlineResult};

/// DejaVu Sans, compiled in so that composition never fails for lack of a font file.
pub const BUILTIN_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Requested font: a font file path or a system family name, plus a pixel size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontDescriptor {
    /// Path to a `.ttf`/`.otf`/`.ttc` file, or a family name such as `"DejaVu Sans"`.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Weight used when `family` is looked up by name (CSS scale, 400 = regular).
    #[serde(default = "default_weight")]
    pub weight: u16,
}

fn default_weight() -> u16 {
    400
}

impl FontDescriptor {
    /// Descriptor with regular weight.
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight: default_weight(),
        }
    }

    /// Same descriptor with another weight.
    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    fn looks_like_path(&self) -> bool {
        let f = self.family.as_str();
        f.contains('/') || f.contains('\\') || {
            let lower = f.to_ascii_lowercase();
            lower.ends_with(".ttf") || lower.ends_with(".otf") || lower.ends_with(".ttc")
        }
    }
}

/// Text role a font is loaded for; used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Headline text.
    Title,
    /// Source attribution.
    Source,
    /// Brand mark text.
    Brand,
}

impl std::fmt::Display for FontRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Source => "source",
            Self::Brand => "brand",
        })
    }
}

/// Where the bytes of a [`LoadedFont`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// Read from the requested file.
    File,
    /// Found in the system font database by family name.
    System,
    /// Compiled-in default, used because the request could not be satisfied.
    Builtin,
}

/// A font registered with a [`FontBook`], ready for measuring and drawing.
#[derive(Clone)]
pub struct LoadedFont {
    role: FontRole,
    size_px: f32,
    origin: FontOrigin,
    requested: String,
    family_name: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
    data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("role", &self.role)
            .field("size_px", &self.size_px)
            .field("origin", &self.origin)
            .field("requested", &self.requested)
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl LoadedFont {
    /// Role the font was loaded for.
    pub fn role(&self) -> FontRole {
        self.role
    }

    /// Size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Source of the font bytes.
    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// `true` when the requested font was unavailable and the built-in default is used.
    pub fn is_fallback(&self) -> bool {
        self.origin == FontOrigin::Builtin
    }

    /// The `family` string that was requested.
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// Family name parsed from the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

/// Per-request text shaping state: parley contexts plus the fonts registered in them.
///
/// Built without parley's system font backend, so only explicitly loaded fonts participate
/// in shaping and measurement is reproducible across machines.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Construct a book with fresh parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Resolve `desc` to a usable font.
    ///
    /// Resolution order is file path, then system family name, then [`BUILTIN_FONT`]. Falling
    /// back to the built-in font logs a warning and is reported by [`LoadedFont::is_fallback`].
    pub fn load(&mut self, role: FontRole, desc: &FontDescriptor) -> PostlineResult<LoadedFont> {
        if !desc.size_px.is_finite() || desc.size_px <= 0.0 {
            return Err(PostlineError::configuration(format!(
                "{role} font size_px must be finite and > 0"
            )));
        }

        if let Some((bytes, index, origin)) = requested_font_bytes(desc) {
            match self.register(role, desc, bytes, index, origin) {
                Ok(font) => return Ok(font),
                Err(err) => {
                    tracing::warn!(%role, family = %desc.family, error = %err, "font data unusable");
                }
            }
        }

        tracing::warn!(
            %role,
            family = %desc.family,
            "font unavailable; falling back to built-in default"
        );
        self.register(role, desc, BUILTIN_FONT.to_vec(), 0, FontOrigin::Builtin)
    }

    fn register(
        &mut self,
        role: FontRole,
        desc: &FontDescriptor,
        bytes: Vec<u8>,
        index: u32,
        origin: FontOrigin,
    ) -> PostlineResult<LoadedFont> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let (family_id, infos) = families
            .into_iter()
            .next()
            .ok_or_else(|| PostlineError::render("no font families registered from font bytes"))?;
        let info = infos
            .iter()
            .find(|info| info.index() == index)
            .or_else(|| infos.first())
            .ok_or_else(|| PostlineError::render("registered font family has no faces"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PostlineError::render("registered font family has no name"))?
            .to_string();

        let font = LoadedFont {
            role,
            size_px: desc.size_px,
            requested: desc.family.clone(),
            origin,
            family_name,
            weight: info.weight(),
            style: info.style(),
            width: info.width(),
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index),
        };
        tracing::debug!(%role, family = %font.family_name, origin = ?font.origin, "font loaded");
        Ok(font)
    }

    /// Shape `text` as a single unbroken line in `font`.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &LoadedFont,
        color: Rgba8,
    ) -> parley::Layout<Rgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(font.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(font.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(font.width));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Rendered advance width of `text` in pixels.
    pub fn measure(&mut self, text: &str, font: &LoadedFont) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, font, Rgba8::default()).width()
    }
}

fn requested_font_bytes(desc: &FontDescriptor) -> Option<(Vec<u8>, u32, FontOrigin)> {
    if desc.family.trim().is_empty() {
        return None;
    }

    let path = Path::new(&desc.family);
    if path.is_file() {
        match std::fs::read(path) {
            Ok(bytes) => return Some((bytes, 0, FontOrigin::File)),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read font file");
                return None;
            }
        }
    }
    if desc.looks_like_path() {
        return None;
    }

    let (bytes, index) = system_font_bytes(&desc.family, desc.weight)?;
    Some((bytes, index, FontOrigin::System))
}

fn system_fonts() -> &'static Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "system font database loaded");
        Arc::new(db)
    })
}

fn system_font_bytes(family: &str, weight: u16) -> Option<(Vec<u8>, u32)> {
    let db = system_fonts();
    let families = [usvg::fontdb::Family::Name(family)];
    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight(weight),
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, index| (data.to_vec(), index))
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
