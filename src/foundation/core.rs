use crate::foundation::error::{PostlineError, PostlineResult};
use crate::foundation::math::{
    mul_div255_u8, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};

pub use kurbo::{Point, Rect};

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Construct a canvas size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Full-canvas rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Straight (non-premultiplied) RGBA8 color, written as `[r, g, b, a]` in style files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct a color from straight channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a replaced alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied `[r, g, b, a]` bytes, the storage format of [`Raster`].
    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

/// Owned raster image in row-major premultiplied RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Raster {
    /// Fully transparent raster of `canvas` size.
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.byte_len()],
        }
    }

    /// Raster filled with a single straight color.
    pub fn solid(canvas: Canvas, color: Rgba8) -> Self {
        let px = color.premultiplied();
        let mut data = Vec::with_capacity(canvas.byte_len());
        for _ in 0..(canvas.width as usize * canvas.height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Wrap premultiplied RGBA8 bytes, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> PostlineResult<Self> {
        if data.len() != Canvas::new(width, height).byte_len() {
            return Err(PostlineError::render(format!(
                "raster byte len {} does not match {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a straight-alpha `image` buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Straight-alpha copy suitable for encoders.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        // Length is checked in every constructor.
        debug_assert_eq!(data.len(), self.width as usize * self.height as usize * 4);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Straight RGB copy with the alpha channel dropped.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let rgba = self.to_rgba_image();
        image::DynamicImage::ImageRgba8(rgba).to_rgb8()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Premultiplied pixel at `(x, y)`; `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Raw premultiplied bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw premultiplied bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Mutable bytes of row `y`.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
