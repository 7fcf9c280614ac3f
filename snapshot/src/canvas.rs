//! Logical drawing surface
//!
//! `Canvas` is what card widgets draw on. Widgets use logical pixels (the
//! card is 450 wide); the canvas multiplies by `scale` before calling the
//! renderer. A canvas built with `Canvas::measure` has no pixel buffer: every
//! draw call is skipped but text measurement still works, so the same layout
//! code computes the card height before anything is allocated.

#![allow(clippy::too_many_arguments)]
use tiny_skia::Color;

use crate::error::RenderError;
use crate::renderer::{FontWeight, Renderer};

/// Largest pixmap dimension accepted, in physical pixels
pub const MAX_DIMENSION: u32 = 16_384;

struct Pixels {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

pub struct Canvas<'r> {
    renderer: &'r mut Renderer,
    pixels: Option<Pixels>,
    scale: f32,
}

impl<'r> Canvas<'r> {
    /// Measurement-only canvas
    pub fn measure(renderer: &'r mut Renderer) -> Self {
        Self {
            renderer,
            pixels: None,
            scale: 1.0,
        }
    }

    /// A pixel canvas of `ceil(width * scale)` by `ceil(height * scale)`
    pub fn new(
        renderer: &'r mut Renderer,
        width: f32,
        height: f32,
        scale: f32,
    ) -> Result<Self, RenderError> {
        let px_width = (width * scale).ceil() as u32;
        let px_height = (height * scale).ceil() as u32;
        if px_width == 0 || px_height == 0 || px_width > MAX_DIMENSION || px_height > MAX_DIMENSION
        {
            return Err(RenderError::InvalidSize {
                width: px_width,
                height: px_height,
            });
        }

        Ok(Self {
            renderer,
            pixels: Some(Pixels {
                data: Renderer::create_buffer(px_width, px_height),
                width: px_width,
                height: px_height,
            }),
            scale,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Physical pixel size, (0, 0) when measuring
    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixels
            .as_ref()
            .map(|p| (p.width, p.height))
            .unwrap_or((0, 0))
    }

    /// Take the premultiplied RGBA pixels. `None` for a measuring canvas.
    pub fn into_pixels(self) -> Option<(Vec<u8>, u32, u32)> {
        self.pixels.map(|p| (p.data, p.width, p.height))
    }

    pub fn clear(&mut self, color: Color) {
        if let Some(p) = self.pixels.as_mut() {
            self.renderer.clear(&mut p.data, p.width, p.height, color);
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let s = self.scale;
        if let Some(p) = self.pixels.as_mut() {
            self.renderer
                .fill_rect(&mut p.data, p.width, p.height, x * s, y * s, w * s, h * s, color);
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: f32, color: Color) {
        let s = self.scale;
        if let Some(p) = self.pixels.as_mut() {
            self.renderer.stroke_rect(
                &mut p.data,
                p.width,
                p.height,
                x * s,
                y * s,
                w * s,
                h * s,
                stroke * s,
                color,
            );
        }
    }

    /// Logical (width, height) of a text block
    pub fn measure_text(
        &mut self,
        text: &str,
        font_size: f32,
        weight: FontWeight,
        max_width: Option<f32>,
    ) -> (f32, f32) {
        self.renderer
            .measure_text(text, font_size, weight, max_width)
    }

    /// Draw a text block with its top-left at (`x`, `y`). Returns its height.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        weight: FontWeight,
        max_width: Option<f32>,
        color: Color,
    ) -> f32 {
        let (_, height) = self
            .renderer
            .measure_text(text, font_size, weight, max_width);

        let s = self.scale;
        if let Some(p) = self.pixels.as_mut() {
            self.renderer.draw_text(
                &mut p.data,
                p.width,
                p.height,
                text,
                x * s,
                y * s,
                font_size,
                weight,
                max_width,
                s,
                color,
            );
        }
        height
    }

    /// Draw single-line text right-aligned to `right`. Returns its height.
    pub fn draw_text_right(
        &mut self,
        text: &str,
        right: f32,
        y: f32,
        font_size: f32,
        weight: FontWeight,
        color: Color,
    ) -> f32 {
        let (width, _) = self.measure_text(text, font_size, weight, None);
        self.draw_text(text, right - width, y, font_size, weight, None, color)
    }

    /// Draw single-line text centered on `center_x`. Returns (width, height).
    pub fn draw_text_centered(
        &mut self,
        text: &str,
        center_x: f32,
        y: f32,
        font_size: f32,
        weight: FontWeight,
        color: Color,
    ) -> (f32, f32) {
        let (width, _) = self.measure_text(text, font_size, weight, None);
        let height = self.draw_text(
            text,
            center_x - width / 2.0,
            y,
            font_size,
            weight,
            None,
            color,
        );
        (width, height)
    }
}
