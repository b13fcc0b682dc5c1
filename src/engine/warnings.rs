use crate::text::font::FontRole;

/// Non-fatal condition found while composing; the image is produced anyway.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompositionWarning {
    /// The requested font was unavailable and the built-in font was used.
    FontFallback {
        /// Text role of the font.
        role: FontRole,
        /// Requested family or path.
        requested: String,
    },
    /// A single word is wider than the headline width and occupies its own line.
    LineOverflow {
        /// Index of the overflowing line.
        line: usize,
        /// The overflowing word.
        text: String,
    },
    /// Headline text extends past the space its layout allocated.
    VerticalOverflow {
        /// Layout that overflowed.
        layout: &'static str,
        /// Top edge of the text block or panel, negative when above the canvas.
        top: f64,
        /// Bottom edge of the headline text.
        bottom: f64,
        /// Last y coordinate the headline was allowed to reach.
        limit: f64,
    },
}

impl std::fmt::Display for CompositionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FontFallback { role, requested } => {
                write!(f, "{role} font '{requested}' unavailable, using built-in font")
            }
            Self::LineOverflow { line, text } => {
                write!(f, "word '{text}' on line {line} is wider than the headline width")
            }
            Self::VerticalOverflow {
                layout,
                top,
                bottom,
                limit,
            } => write!(
                f,
                "{layout} layout overflows: text spans {top:.0}..{bottom:.0}, limit {limit:.0}"
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/warnings.rs"]
mod tests;
