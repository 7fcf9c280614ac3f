//! Labeled text boxes: grind setting, analysis, champion inspiration

use crate::canvas::Canvas;
use crate::renderer::FontWeight;
use crate::widgets::colors;

const LABEL_SIZE: f32 = 10.0;

/// Box treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    /// Light panel with a thick black rule on the left, label inside
    LeftRule,
    /// Label above a thin bordered box
    Bordered,
    /// Black panel with an amber label
    Inverted,
}

impl BoxStyle {
    fn padding(self) -> f32 {
        match self {
            BoxStyle::LeftRule => 20.0,
            BoxStyle::Bordered => 16.0,
            BoxStyle::Inverted => 24.0,
        }
    }

    fn body_font(self) -> (f32, FontWeight) {
        match self {
            BoxStyle::LeftRule => (18.0, FontWeight::Bold),
            BoxStyle::Bordered | BoxStyle::Inverted => (12.0, FontWeight::Medium),
        }
    }
}

/// A label and a wrapped paragraph in a box
#[derive(Debug, Clone)]
pub struct NoteBox {
    pub label: String,
    pub body: String,
    pub style: BoxStyle,
}

impl NoteBox {
    pub fn new(label: impl Into<String>, body: impl Into<String>, style: BoxStyle) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
            style,
        }
    }

    /// Render at (`x`, `y`) spanning `width`. Returns the height used.
    pub fn render(&self, canvas: &mut Canvas, x: f32, y: f32, width: f32) -> f32 {
        let pad = self.style.padding();
        let (body_size, body_weight) = self.style.body_font();

        match self.style {
            BoxStyle::Bordered => {
                let label_h = canvas.draw_text(
                    &self.label,
                    x,
                    y,
                    LABEL_SIZE,
                    FontWeight::Black,
                    None,
                    colors::label(),
                );
                let box_y = y + label_h + 12.0;
                let inner = width - pad * 2.0;
                let (_, body_h) = canvas.measure_text(&self.body, body_size, body_weight, Some(inner));
                let box_h = body_h + pad * 2.0;

                canvas.stroke_rect(x, box_y, width, box_h, 1.0, colors::border());
                canvas.draw_text(
                    &self.body,
                    x + pad,
                    box_y + pad,
                    body_size,
                    body_weight,
                    Some(inner),
                    colors::body(),
                );
                label_h + 12.0 + box_h
            }
            BoxStyle::LeftRule | BoxStyle::Inverted => {
                let rule = if self.style == BoxStyle::LeftRule { 4.0 } else { 0.0 };
                let inner = width - rule - pad * 2.0;
                let (_, label_h) = canvas.measure_text(&self.label, LABEL_SIZE, FontWeight::Black, None);
                let (_, body_h) = canvas.measure_text(&self.body, body_size, body_weight, Some(inner));
                let box_h = pad + label_h + 8.0 + body_h + pad;

                let (bg, label_color, body_color) = match self.style {
                    BoxStyle::Inverted => (colors::black(), colors::amber(), colors::inverted_body()),
                    _ => (colors::panel_bg(), colors::label_dark(), colors::black()),
                };
                canvas.fill_rect(x, y, width, box_h, bg);
                if rule > 0.0 {
                    canvas.fill_rect(x, y, rule, box_h, colors::black());
                }

                let text_x = x + rule + pad;
                canvas.draw_text(
                    &self.label,
                    text_x,
                    y + pad,
                    LABEL_SIZE,
                    FontWeight::Black,
                    None,
                    label_color,
                );
                canvas.draw_text(
                    &self.body,
                    text_x,
                    y + pad + label_h + 8.0,
                    body_size,
                    body_weight,
                    Some(inner),
                    body_color,
                );
                box_h
            }
        }
    }
}
