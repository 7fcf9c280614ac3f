//! The brew log card
//!
//! A fixed-width (450 logical px) summary of one brew plan: header, dose and
//! temperature stats, grind setting, analysis, the numbered step list and the
//! champion inspiration. Height follows the content. `render` lays the card
//! out twice: once on a measuring canvas to find the height, then on a pixel
//! canvas of exactly that size.

use brewlog_core::timeline::RecipeTimeline;
use brewlog_core::timer::format_friendly_time;
use brewlog_types::{BrewMetadata, CardLabels};

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::renderer::{FontWeight, Renderer};
use crate::utils::{format_amount, text_or};
use crate::widgets::{Align, BoxStyle, Header, LabeledValue, NoteBox, StepRow, colors};

/// Logical card width, independent of any viewport
pub const CARD_WIDTH: f32 = 450.0;

const PADDING: f32 = 32.0;
const PADDING_BOTTOM: f32 = 40.0;
const SECTION_GAP: f32 = 32.0;
const COLUMN_GAP: f32 = 32.0;

const DEFAULT_TEMPERATURE_C: f64 = 90.0;
const DEFAULT_RATIO: &str = "1:15";
const MISSING: &str = "N/A";

/// Premultiplied RGBA pixels of a rendered card
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

/// Card content, resolved to display strings
#[derive(Debug, Clone)]
pub struct BrewCard {
    header: Header,
    dose: LabeledValue,
    temp_ratio: LabeledValue,
    grind: NoteBox,
    analysis: NoteBox,
    steps_label: String,
    steps: Vec<StepRow>,
    champion: NoteBox,
}

impl BrewCard {
    pub fn new(timeline: &RecipeTimeline, metadata: &BrewMetadata, labels: CardLabels) -> Self {
        let temperature = metadata
            .temperature
            .filter(|t| *t > 0.0)
            .unwrap_or(DEFAULT_TEMPERATURE_C);

        let dose = LabeledValue::new(
            format!("{} / {}", labels.dose, labels.volume),
            format!("{}g", format_amount(metadata.coffee_weight)),
            format!("{}ml", format_amount(metadata.total_water)),
        );
        let temp_ratio = LabeledValue::new(
            labels.temp_ratio,
            format!("{}°C", format_amount(temperature)),
            text_or(metadata.water_ratio.as_deref(), DEFAULT_RATIO),
        )
        .with_align(Align::Right);

        let last = timeline.len().saturating_sub(1);
        let steps = timeline
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| StepRow {
                number: i + 1,
                action: step.action.clone(),
                time_range: format!(
                    "{} - {}",
                    format_friendly_time(step.start_offset_secs),
                    format_friendly_time(step.end_secs())
                ),
                water: format!("→ {}ml", format_amount(step.cumulative_water_ml)),
                description: step.description.clone(),
                divider: i != last,
            })
            .collect();

        Self {
            header: Header::new(labels.title, labels.subtitle),
            dose,
            temp_ratio,
            grind: NoteBox::new(
                labels.grind,
                text_or(metadata.grind_size.as_deref(), MISSING),
                BoxStyle::LeftRule,
            ),
            analysis: NoteBox::new(
                labels.analysis,
                text_or(metadata.variable_analysis.as_deref(), MISSING),
                BoxStyle::Bordered,
            ),
            steps_label: labels.steps.to_string(),
            steps,
            champion: NoteBox::new(
                labels.champion,
                text_or(metadata.champion_inspiration.as_deref(), MISSING),
                BoxStyle::Inverted,
            ),
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Draw every section top to bottom. Returns the total logical height.
    pub fn layout(&self, canvas: &mut Canvas) -> f32 {
        let x = PADDING;
        let width = CARD_WIDTH - PADDING * 2.0;

        let mut y = self.header.render(canvas, x, PADDING, width);
        y += SECTION_GAP;

        let column = (width - COLUMN_GAP) / 2.0;
        let left_h = self.dose.render(canvas, x, y, column);
        let right_h = self
            .temp_ratio
            .render(canvas, x + column + COLUMN_GAP, y, column);
        y += left_h.max(right_h) + SECTION_GAP;

        y += self.grind.render(canvas, x, y, width) + SECTION_GAP;
        y += self.analysis.render(canvas, x, y, width) + SECTION_GAP;

        y += canvas.draw_text(
            &self.steps_label,
            x,
            y,
            10.0,
            FontWeight::Black,
            None,
            colors::label(),
        );
        y += 16.0;
        for row in &self.steps {
            y += row.render(canvas, x, y, width);
        }
        y += 16.0;

        y += self.champion.render(canvas, x, y, width);
        y + PADDING_BOTTOM
    }

    /// Measure, allocate and draw the card at `scale`.
    pub fn render(&self, renderer: &mut Renderer, scale: f32) -> Result<RenderedCard, RenderError> {
        let height = self.layout(&mut Canvas::measure(renderer));
        if !height.is_finite() {
            return Err(RenderError::Layout(height));
        }

        let mut canvas = Canvas::new(renderer, CARD_WIDTH, height, scale)?;
        canvas.clear(colors::white());
        self.layout(&mut canvas);

        let (pixels, width, height) = canvas
            .into_pixels()
            .ok_or(RenderError::Layout(height))?;
        Ok(RenderedCard {
            pixels,
            width,
            height,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewlog_core::timeline::RecipeStep;
    use brewlog_types::Language;

    fn timeline(steps: usize) -> RecipeTimeline {
        let steps = (0..steps)
            .map(|i| {
                let start = i as u32 * 40;
                RecipeStep::new(start, 40, 60.0 * (i + 1) as f64, format!("Pour {}", i + 1))
                    .with_description("Slow spiral from the center outwards")
            })
            .collect();
        RecipeTimeline::new(steps).unwrap()
    }

    fn metadata() -> BrewMetadata {
        BrewMetadata {
            coffee_weight: 20.0,
            total_water: 300.0,
            grind_size: Some("Medium-fine".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_width_is_fixed_and_scaled() {
        let card = BrewCard::new(&timeline(3), &metadata(), Language::En.card_labels());
        let mut renderer = Renderer::new();

        let one = card.render(&mut renderer, 1.0).unwrap();
        let three = card.render(&mut renderer, 3.0).unwrap();

        assert_eq!(one.width, 450);
        assert_eq!(three.width, 1350);
        assert!(three.height >= one.height * 3 - 3);
        assert!(three.height <= one.height * 3 + 3);
        assert_eq!(three.pixels.len(), (three.width * three.height * 4) as usize);
    }

    #[test]
    fn test_height_grows_with_steps() {
        let mut renderer = Renderer::new();
        let short = BrewCard::new(&timeline(1), &metadata(), Language::En.card_labels())
            .render(&mut renderer, 1.0)
            .unwrap();
        let long = BrewCard::new(&timeline(6), &metadata(), Language::En.card_labels())
            .render(&mut renderer, 1.0)
            .unwrap();
        assert!(long.height > short.height);
    }

    #[test]
    fn test_background_is_opaque_white() {
        let card = BrewCard::new(&timeline(2), &metadata(), Language::Ja.card_labels());
        let rendered = card.render(&mut Renderer::new(), 1.0).unwrap();
        // top-left corner sits in the padding
        assert_eq!(&rendered.pixels[0..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_empty_timeline_still_renders() {
        let card = BrewCard::new(
            &RecipeTimeline::empty(),
            &BrewMetadata::default(),
            Language::En.card_labels(),
        );
        assert_eq!(card.step_count(), 0);
        assert!(card.render(&mut Renderer::new(), 2.0).is_ok());
    }
}
