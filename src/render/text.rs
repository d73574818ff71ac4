//! Label sizing without a font context.
//!
//! Widths are estimated from the character count, which is close enough for
//! proportional UI fonts and keeps frame planning independent of egui's
//! layout engine.

/// Average glyph advance relative to the font size
const CHAR_ADVANCE: f32 = 0.55;

const ELLIPSIS: char = '…';

/// Estimated rendered width of `text`.
#[inline]
pub fn approx_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_ADVANCE
}

/// `text` shortened with a trailing ellipsis so it fits in `max_width`.
///
/// Returns `None` when not even one character plus the ellipsis fits.
pub fn elide(text: &str, max_width: f32, font_size: f32) -> Option<String> {
    if approx_width(text, font_size) <= max_width {
        return Some(text.to_owned());
    }
    let advance = font_size * CHAR_ADVANCE;
    if advance <= 0.0 {
        return None;
    }
    // room for n chars + ellipsis
    let n = (max_width / advance).floor() as usize;
    if n < 2 {
        return None;
    }
    let mut out: String = text.chars().take(n - 1).collect();
    out.push(ELLIPSIS);
    Some(out)
}
