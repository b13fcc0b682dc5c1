use crate::text::metrics::TextMeasure;

/// Headline split into display lines by [`wrap`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrappedText {
    lines: Vec<String>,
    overflowing: Vec<usize>,
    max_width: f32,
}

impl WrappedText {
    /// Lines in display order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// `true` when the input had no words.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Indices of single-word lines that are wider than [`Self::max_width`].
    pub fn overflowing(&self) -> &[usize] {
        &self.overflowing
    }

    /// Width budget the text was wrapped against.
    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    /// Consume into the plain line list.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Greedy word wrap: fill each line with as many whitespace-separated words as fit `max_width`.
///
/// Words are never split. A word that is wider than `max_width` on its own gets a line to
/// itself and is listed in [`WrappedText::overflowing`].
pub fn wrap(text: &str, metrics: &mut impl TextMeasure, max_width: f32) -> WrappedText {
    let mut out = WrappedText {
        lines: Vec::new(),
        overflowing: Vec::new(),
        max_width,
    };
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        current.push(word);
        if metrics.measure(&current.join(" ")) <= max_width {
            continue;
        }

        if current.len() == 1 {
            out.push_overflowing(word);
            current.clear();
            continue;
        }

        current.pop();
        out.lines.push(current.join(" "));
        current.clear();

        if metrics.measure(word) > max_width {
            out.push_overflowing(word);
        } else {
            current.push(word);
        }
    }

    if !current.is_empty() {
        out.lines.push(current.join(" "));
    }
    out
}

impl WrappedText {
    fn push_overflowing(&mut self, word: &str) {
        self.overflowing.push(self.lines.len());
        self.lines.push(word.to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
