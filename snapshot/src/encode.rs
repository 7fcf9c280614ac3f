//! PNG encoding for rendered cards

use png::{BitDepth, ColorType, Encoder, EncodingError, PixelDimensions, Unit};

use crate::card::RenderedCard;

/// 72 dpi in pixels per meter
const BASE_PIXELS_PER_METER: f32 = 72.0 / 0.0254;

/// Encode a rendered card as an RGBA PNG.
///
/// Pixels are un-premultiplied first; the pHYs chunk records 72 dpi times
/// the render scale so print tools size the image like the on-screen card.
pub fn encode_png(card: &RenderedCard) -> Result<Vec<u8>, EncodingError> {
    let mut rgba = card.pixels.clone();
    demultiply(&mut rgba);

    let ppu = (BASE_PIXELS_PER_METER * card.scale).round() as u32;
    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, card.width, card.height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: ppu,
            yppu: ppu,
            unit: Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Convert premultiplied RGBA to straight alpha in place
fn demultiply(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3] as u32;
        match a {
            0 => px[..3].fill(0),
            255 => {}
            _ => {
                for c in &mut px[..3] {
                    *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}
