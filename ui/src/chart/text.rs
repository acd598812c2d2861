//! Heuristic text metrics for chart layout.
//!
//! The renderer only needs rough extents to size the label band under the
//! plot; exact glyph shaping happens wherever the SVG ends up being drawn.
//! Ratios are tuned for a generic sans-serif face.

use std::borrow::Cow;

const ELLIPSIS: &str = "…";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Vertical line height for layout rhythm.
    pub line_h: f64,
    /// Ascender distance above the baseline.
    pub asc: f64,
    /// Descender distance below the baseline (positive).
    pub desc: f64,
}

pub fn metrics(size_px: f64) -> TextMetrics {
    let line_h = (size_px * 1.28).round();
    let asc = (size_px * 0.92).round();
    let desc = (line_h - asc).max(size_px * 0.08).round();
    TextMetrics { line_h, asc, desc }
}

/// Estimated advance width of `text` at `size_px`.
pub fn estimate_width(text: &str, weight: FontWeight, size_px: f64) -> f64 {
    let per_char = match weight {
        FontWeight::Regular => 0.55,
        FontWeight::Bold => 0.6,
    };
    text.chars()
        .map(|ch| match ch {
            ' ' | 'i' | 'l' | 'j' | 't' | 'f' | 'r' | '.' | ',' | '\'' | '’' | '-' | '/' => 0.6,
            'm' | 'w' | 'M' | 'W' => 1.4,
            _ if ch.is_uppercase() => 1.2,
            _ => 1.0,
        })
        .sum::<f64>()
        * per_char
        * size_px
}

/// `text` as is when it fits in `max_width`, otherwise cut at a character
/// boundary and finished with an ellipsis.
pub fn fit_width(text: &str, weight: FontWeight, size_px: f64, max_width: f64) -> Cow<'_, str> {
    if estimate_width(text, weight, size_px) <= max_width {
        return Cow::Borrowed(text);
    }

    let budget = max_width - estimate_width(ELLIPSIS, weight, size_px);
    let mut used = 0.0;
    let mut end = 0;
    let mut buf = [0u8; 4];
    for (at, ch) in text.char_indices() {
        let advance = estimate_width(ch.encode_utf8(&mut buf), weight, size_px);
        if used + advance > budget {
            break;
        }
        used += advance;
        end = at + ch.len_utf8();
    }
    Cow::Owned(format!("{}{ELLIPSIS}", text[..end].trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_increase_with_size() {
        let small = metrics(12.0);
        let large = metrics(48.0);
        assert!(large.line_h > small.line_h);
        assert!(large.asc > small.asc);
    }

    #[test]
    fn width_scales_with_length_and_weight() {
        let short = estimate_width("QI", FontWeight::Regular, 12.0);
        let long = estimate_width("Vitesse de traitement", FontWeight::Regular, 12.0);
        assert!(long > short);
        assert!(
            estimate_width("Attention", FontWeight::Bold, 16.0)
                > estimate_width("Attention", FontWeight::Regular, 16.0)
        );
        assert_eq!(estimate_width("", FontWeight::Bold, 16.0), 0.0);
    }

    #[test]
    fn short_text_is_borrowed_unchanged() {
        let fitted = fit_width("QI", FontWeight::Regular, 12.0, 100.0);
        assert!(matches!(fitted, Cow::Borrowed("QI")));
    }

    #[test]
    fn long_text_is_ellipsized_within_the_limit() {
        let label = "Wisconsin Nombre d’essais pour compléter la première catégorie";
        let fitted = fit_width(label, FontWeight::Regular, 12.0, 250.0);
        assert!(fitted.ends_with('…'));
        assert!(label.starts_with(fitted.trim_end_matches('…')));
        assert!(estimate_width(&fitted, FontWeight::Regular, 12.0) <= 250.0 + 1e-9);
    }

    #[test]
    fn no_room_leaves_only_the_ellipsis() {
        assert_eq!(fit_width("Attention", FontWeight::Bold, 16.0, 1.0), "…");
    }
}
