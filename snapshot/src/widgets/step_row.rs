//! One numbered step in the card's step list

use crate::canvas::Canvas;
use crate::renderer::FontWeight;
use crate::widgets::colors;

const BADGE: f32 = 28.0;
const GAP: f32 = 16.0;

#[derive(Debug, Clone)]
pub struct StepRow {
    /// 1-based position shown in the badge
    pub number: usize,
    pub action: String,
    /// e.g. `1m 05s - 2m 00s`
    pub time_range: String,
    /// e.g. `→ 120ml`
    pub water: String,
    pub description: String,
    pub divider: bool,
}

impl StepRow {
    /// Render the row. Returns the height used, including bottom padding.
    pub fn render(&self, canvas: &mut Canvas, x: f32, y: f32, width: f32) -> f32 {
        // Number badge
        canvas.fill_rect(x, y + 2.0, BADGE, BADGE, colors::black());
        let number = self.number.to_string();
        let (_, num_h) = canvas.measure_text(&number, 11.0, FontWeight::Bold, None);
        canvas.draw_text_centered(
            &number,
            x + BADGE / 2.0,
            y + 2.0 + (BADGE - num_h) / 2.0,
            11.0,
            FontWeight::Bold,
            colors::white(),
        );

        let content_x = x + BADGE + GAP;
        let content_w = width - BADGE - GAP;
        let right = content_x + content_w;

        // Right side: time chip then water target
        let (water_w, _) = canvas.measure_text(&self.water, 12.0, FontWeight::Bold, None);
        canvas.draw_text_right(&self.water, right, y, 12.0, FontWeight::Bold, colors::black());

        let (range_w, range_h) = canvas.measure_text(&self.time_range, 10.0, FontWeight::Bold, None);
        let chip_right = right - water_w - 8.0;
        canvas.fill_rect(chip_right - range_w - 6.0, y + 1.0, range_w + 6.0, range_h, colors::chip_bg());
        canvas.draw_text_right(&self.time_range, chip_right - 3.0, y + 1.0, 10.0, FontWeight::Bold, colors::label());

        // Left side: action, wrapped before the chip
        let action_w = (chip_right - range_w - 12.0 - content_x).max(40.0);
        let action_h = canvas.draw_text(
            &self.action,
            content_x,
            y,
            14.0,
            FontWeight::Bold,
            Some(action_w),
            colors::black(),
        );

        let desc_y = y + action_h + 4.0;
        let desc_h = if self.description.is_empty() {
            0.0
        } else {
            canvas.draw_text(
                &self.description,
                content_x,
                desc_y,
                10.0,
                FontWeight::Regular,
                Some(content_w),
                colors::label_dark(),
            )
        };

        let bottom = (desc_y + desc_h).max(y + 2.0 + BADGE) + 16.0;
        if self.divider {
            canvas.fill_rect(content_x, bottom - 1.0, content_w, 1.0, colors::chip_bg());
        }
        bottom - y
    }
}
