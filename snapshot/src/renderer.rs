//! Software renderer using tiny-skia and cosmic-text
//!
//! Draws into caller-owned RGBA (premultiplied) pixel buffers. Coordinates
//! here are physical pixels; `Canvas` handles the logical-to-physical scale.
//! Text is shaped at logical size and rasterized at `scale`, so glyphs stay
//! sharp at high pixel densities.
#![allow(clippy::too_many_arguments)]
use std::collections::HashMap;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache, SwashContent, Weight,
};
use tiny_skia::{Color, Paint, PixmapMut, Rect, Transform};

/// Maximum entries in the text shaping cache (LRU eviction when exceeded)
const TEXT_CACHE_MAX_ENTRIES: usize = 256;

/// Line height as a multiple of font size
pub const LINE_HEIGHT: f32 = 1.35;

/// Text weight used on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Medium,
    Bold,
    Black,
}

impl FontWeight {
    fn to_cosmic(self) -> Weight {
        match self {
            FontWeight::Regular => Weight::NORMAL,
            FontWeight::Medium => Weight::MEDIUM,
            FontWeight::Bold => Weight::BOLD,
            FontWeight::Black => Weight::BLACK,
        }
    }
}

/// A shaped glyph plus the baseline of the line it sits on
#[derive(Clone)]
struct PlacedGlyph {
    glyph: LayoutGlyph,
    line_y: f32,
}

/// Cached result of text shaping
struct CachedText {
    glyphs: Vec<PlacedGlyph>,
    width: f32,
    height: f32,
    /// LRU tracking: incremented on each access
    last_used: u64,
}

/// Text, font size in tenths, weight, wrap width in tenths (0 = no wrap)
type TextCacheKey = (String, u32, FontWeight, u32);

/// A software renderer for the brew log card
pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    text_cache: HashMap<TextCacheKey, CachedText>,
    cache_access_counter: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            text_cache: HashMap::with_capacity(64),
            cache_access_counter: 0,
        }
    }

    /// Evict least recently used entries if cache is too large
    fn evict_lru_if_needed(&mut self) {
        if self.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES {
            return;
        }

        let target_size = TEXT_CACHE_MAX_ENTRIES * 3 / 4;
        let mut entries: Vec<_> = self
            .text_cache
            .iter()
            .map(|(k, v)| (k.clone(), v.last_used))
            .collect();
        entries.sort_by_key(|(_, last_used)| *last_used);

        for (key, _) in entries
            .into_iter()
            .take(self.text_cache.len() - target_size)
        {
            self.text_cache.remove(&key);
        }
    }

    fn cache_key(text: &str, font_size: f32, weight: FontWeight, max_width: Option<f32>) -> TextCacheKey {
        let width_key = max_width.map(|w| (w * 10.0).round() as u32).unwrap_or(0);
        (
            text.to_string(),
            (font_size * 10.0).round() as u32,
            weight,
            width_key,
        )
    }

    /// Ensure text is cached, shaping if needed. Returns logical (width, height).
    fn ensure_cached(
        &mut self,
        text: &str,
        font_size: f32,
        weight: FontWeight,
        max_width: Option<f32>,
    ) -> (f32, f32) {
        let key = Self::cache_key(text, font_size, weight, max_width);

        self.cache_access_counter += 1;
        let current_access = self.cache_access_counter;

        if let Some(cached) = self.text_cache.get_mut(&key) {
            cached.last_used = current_access;
            return (cached.width, cached.height);
        }

        let line_height = font_size * LINE_HEIGHT;
        let metrics = Metrics::new(font_size, line_height);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);
        text_buffer.set_size(&mut self.font_system, max_width, None);

        let attrs = Attrs::new()
            .family(Family::Name("Noto Sans"))
            .weight(weight.to_cosmic());
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height = height.max(run.line_top + run.line_height);

            for glyph in run.glyphs.iter() {
                glyphs.push(PlacedGlyph {
                    glyph: glyph.clone(),
                    line_y: run.line_y,
                });
            }
        }

        // Empty strings still occupy one line so layouts do not collapse
        let height = height.max(line_height);

        self.text_cache.insert(
            key,
            CachedText {
                glyphs,
                width,
                height,
                last_used: current_access,
            },
        );
        self.evict_lru_if_needed();

        (width, height)
    }

    /// Create a new pixel buffer (RGBA format)
    pub fn create_buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width as usize) * (height as usize) * 4]
    }

    /// Clear a pixel buffer with a color
    pub fn clear(&self, buffer: &mut [u8], width: u32, height: u32, color: Color) {
        if let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) {
            pixmap.fill(color);
        }
    }

    /// Draw a filled rectangle
    pub fn fill_rect(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
            return;
        };
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Draw a rectangle outline of `stroke` thickness, inset into the rect
    pub fn stroke_rect(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        stroke: f32,
        color: Color,
    ) {
        self.fill_rect(buffer, width, height, x, y, w, stroke, color);
        self.fill_rect(buffer, width, height, x, y + h - stroke, w, stroke, color);
        self.fill_rect(buffer, width, height, x, y, stroke, h, color);
        self.fill_rect(buffer, width, height, x + w - stroke, y, stroke, h, color);
    }

    /// Draw text with its top-left corner at physical (`x`, `y`).
    ///
    /// `font_size` and `max_width` are logical; glyphs are rasterized at
    /// `scale`.
    pub fn draw_text(
        &mut self,
        buffer: &mut [u8],
        buf_width: u32,
        buf_height: u32,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        weight: FontWeight,
        max_width: Option<f32>,
        scale: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, buf_width, buf_height) else {
            return;
        };

        self.ensure_cached(text, font_size, weight, max_width);
        let key = Self::cache_key(text, font_size, weight, max_width);
        // Clone out; the swash cache needs &mut self below
        let glyphs = self
            .text_cache
            .get(&key)
            .map(|c| c.glyphs.clone())
            .unwrap_or_default();

        let text_color = CosmicColor::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        for placed in &glyphs {
            let physical_glyph = placed
                .glyph
                .physical((x, y + placed.line_y * scale), scale);

            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical_glyph.cache_key)
            {
                if !matches!(image.content, SwashContent::Mask) {
                    continue;
                }
                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y - image.placement.top;

                draw_glyph_to_pixmap(
                    &mut pixmap,
                    &image.data,
                    image.placement.width,
                    image.placement.height,
                    glyph_x,
                    glyph_y,
                    text_color,
                );
            }
        }
    }

    /// Measure text in logical units (uses shaping cache)
    pub fn measure_text(
        &mut self,
        text: &str,
        font_size: f32,
        weight: FontWeight,
        max_width: Option<f32>,
    ) -> (f32, f32) {
        self.ensure_cached(text, font_size, weight, max_width)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a glyph coverage mask onto a pixmap with alpha blending
fn draw_glyph_to_pixmap(
    pixmap: &mut PixmapMut,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let glyph_idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&alpha) = glyph_data.get(glyph_idx) else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            let pixel_idx = ((py as u32 * pixmap_width as u32 + px as u32) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            // Source-over in premultiplied space
            let src_a = (alpha as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;

            data[pixel_idx] =
                ((color.r() as u32 * src_a + data[pixel_idx] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 1] =
                ((color.g() as u32 * src_a + data[pixel_idx + 1] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 2] =
                ((color.b() as u32 * src_a + data[pixel_idx + 2] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 3] = (src_a + (data[pixel_idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}
