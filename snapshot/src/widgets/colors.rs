//! Brew log card palette

use tiny_skia::Color;

#[inline]
pub fn black() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

#[inline]
pub fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

// ─────────────────────────────────────────────────────────────────────────
// Card Text
// ─────────────────────────────────────────────────────────────────────────

/// Small uppercase section labels
#[inline]
pub fn label() -> Color {
    Color::from_rgba8(156, 163, 175, 255)
}

/// Subtitle and secondary labels
#[inline]
pub fn label_dark() -> Color {
    Color::from_rgba8(107, 114, 128, 255)
}

/// Body copy inside boxes
#[inline]
pub fn body() -> Color {
    Color::from_rgba8(75, 85, 99, 255)
}

/// Slash between paired stat values
#[inline]
pub fn separator() -> Color {
    Color::from_rgba8(209, 213, 219, 255)
}

/// Champion label on the inverted box
#[inline]
pub fn amber() -> Color {
    Color::from_rgba8(251, 191, 36, 255)
}

/// Champion body on the inverted box
#[inline]
pub fn inverted_body() -> Color {
    Color::from_rgba8(255, 255, 255, 230)
}

// ─────────────────────────────────────────────────────────────────────────
// Card Chrome
// ─────────────────────────────────────────────────────────────────────────

/// Thin rules flanking the subtitle
#[inline]
pub fn rule() -> Color {
    Color::from_rgba8(156, 163, 175, 255)
}

/// Box borders and step dividers
#[inline]
pub fn border() -> Color {
    Color::from_rgba8(229, 231, 235, 255)
}

/// Grind box background
#[inline]
pub fn panel_bg() -> Color {
    Color::from_rgba8(249, 250, 251, 255)
}

/// Time range chip behind step timings
#[inline]
pub fn chip_bg() -> Color {
    Color::from_rgba8(243, 244, 246, 255)
}
