/// Decoding, size checks and the flat fallback background.
pub mod background;
