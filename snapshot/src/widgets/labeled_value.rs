//! Stat column: small label over a large value pair

use tiny_skia::Color;

use crate::canvas::Canvas;
use crate::renderer::FontWeight;
use crate::widgets::colors;

const LABEL_SIZE: f32 = 10.0;
const VALUE_SIZE: f32 = 24.0;
const SLASH_SIZE: f32 = 16.0;

/// Horizontal alignment of a stat column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A label with two values separated by a light slash, e.g. `20g / 300ml`
#[derive(Debug, Clone)]
pub struct LabeledValue {
    pub label: String,
    pub first: String,
    pub second: String,
    pub align: Align,
    pub value_color: Color,
}

impl LabeledValue {
    pub fn new(label: impl Into<String>, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            first: first.into(),
            second: second.into(),
            align: Align::Left,
            value_color: colors::black(),
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Render within `[x, x + width]`. Returns the height used.
    pub fn render(&self, canvas: &mut Canvas, x: f32, y: f32, width: f32) -> f32 {
        let first = format!("{} ", self.first);
        let second = format!(" {}", self.second);

        let (label_w, label_h) = canvas.measure_text(&self.label, LABEL_SIZE, FontWeight::Black, None);
        let (first_w, value_h) = canvas.measure_text(&first, VALUE_SIZE, FontWeight::Black, None);
        let (slash_w, _) = canvas.measure_text("/", SLASH_SIZE, FontWeight::Black, None);
        let (second_w, _) = canvas.measure_text(&second, VALUE_SIZE, FontWeight::Black, None);
        let value_w = first_w + slash_w + second_w;

        let (label_x, value_x) = match self.align {
            Align::Left => (x, x),
            Align::Right => (x + width - label_w, x + width - value_w),
        };

        canvas.draw_text(&self.label, label_x, y, LABEL_SIZE, FontWeight::Black, None, colors::label());

        let value_y = y + label_h + 4.0;
        canvas.draw_text(&first, value_x, value_y, VALUE_SIZE, FontWeight::Black, None, self.value_color);
        // baseline-align the smaller slash with the values
        let slash_y = value_y + (VALUE_SIZE - SLASH_SIZE) * 0.9;
        canvas.draw_text("/", value_x + first_w, slash_y, SLASH_SIZE, FontWeight::Black, None, colors::separator());
        canvas.draw_text(
            &second,
            value_x + first_w + slash_w,
            value_y,
            VALUE_SIZE,
            FontWeight::Black,
            None,
            self.value_color,
        );

        label_h + 4.0 + value_h
    }
}
