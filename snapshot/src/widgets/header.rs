//! Card header: title, subtitle flanked by rules, heavy underline

use tiny_skia::Color;

use crate::canvas::Canvas;
use crate::renderer::FontWeight;
use crate::widgets::colors;

const TITLE_SIZE: f32 = 34.0;
const SUBTITLE_SIZE: f32 = 10.0;
const RULE_WIDTH: f32 = 32.0;
const RULE_GAP: f32 = 12.0;
const UNDERLINE: f32 = 3.0;

/// The centered title block at the top of the card
#[derive(Debug, Clone)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
    pub color: Color,
}

impl Header {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            color: colors::black(),
        }
    }

    /// Render the header and return the y position below its underline
    pub fn render(&self, canvas: &mut Canvas, x: f32, y: f32, width: f32) -> f32 {
        let center = x + width / 2.0;

        let (_, title_h) =
            canvas.draw_text_centered(&self.title, center, y, TITLE_SIZE, FontWeight::Black, self.color);
        let sub_y = y + title_h + 6.0;

        let (sub_w, sub_h) = canvas.draw_text_centered(
            &self.subtitle,
            center,
            sub_y,
            SUBTITLE_SIZE,
            FontWeight::Bold,
            colors::label_dark(),
        );

        let rule_y = sub_y + sub_h / 2.0;
        let left = center - sub_w / 2.0 - RULE_GAP - RULE_WIDTH;
        let right = center + sub_w / 2.0 + RULE_GAP;
        canvas.fill_rect(left, rule_y, RULE_WIDTH, 1.0, colors::rule());
        canvas.fill_rect(right, rule_y, RULE_WIDTH, 1.0, colors::rule());

        let underline_y = sub_y + sub_h + 24.0;
        canvas.fill_rect(x, underline_y, width, UNDERLINE, self.color);
        underline_y + UNDERLINE
    }
}
