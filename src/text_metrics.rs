//! Text measurement seam.
//!
//! The editor never measures glyphs itself; it asks a [`TextMetrics`]
//! implementation injected at construction. [`EstimatedMetrics`] is a
//! deterministic stand-in based on fixed advance and line-height ratios.

#[derive(Clone, Debug, PartialEq)]
pub struct TextMeasure {
    pub width: f32,
    pub height: f32,
    pub lines: Vec<String>,
}

pub trait TextMetrics {
    /// Size of `text` laid out at `font_size`. With `max_width`, lines are
    /// wrapped greedily at word boundaries. Must be deterministic.
    fn measure(
        &self,
        text: &str,
        font_size: f32,
        font_family: &str,
        max_width: Option<f32>,
    ) -> TextMeasure;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatedMetrics {
    pub advance_ratio: f32,
    pub line_height_ratio: f32,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl EstimatedMetrics {
    fn line_width(&self, line: &str, font_size: f32) -> f32 {
        line.chars().count() as f32 * font_size * self.advance_ratio
    }

    fn wrap_line(&self, line: &str, font_size: f32, max_width: f32, out: &mut Vec<String>) {
        let advance = (font_size * self.advance_ratio).max(f32::EPSILON);
        let max_chars = ((max_width / advance).floor() as usize).max(1);

        let mut current = String::new();
        for word in line.split(' ') {
            let mut word = word.to_string();
            // Words longer than a full line are hard-broken.
            while word.chars().count() > max_chars {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                let split_at = word
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                let rest = word.split_off(split_at);
                out.push(word);
                word = rest;
            }
            let candidate = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if candidate > max_chars && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        out.push(current);
    }
}

impl TextMetrics for EstimatedMetrics {
    fn measure(
        &self,
        text: &str,
        font_size: f32,
        _font_family: &str,
        max_width: Option<f32>,
    ) -> TextMeasure {
        let mut lines = Vec::new();
        for raw in text.split('\n') {
            match max_width {
                Some(w) => self.wrap_line(raw, font_size, w, &mut lines),
                None => lines.push(raw.to_string()),
            }
        }
        let width = lines
            .iter()
            .map(|l| self.line_width(l, font_size))
            .fold(0.0, f32::max);
        let height = lines.len() as f32 * font_size * self.line_height_ratio;
        TextMeasure {
            width,
            height,
            lines,
        }
    }
}

#[cfg(test)]
#[path = "text_metrics_test.rs"]
mod tests;
