use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Pixel, RgbImage, RgbaImage};
use tracing::debug;

use crate::config::OutputFormat;
use crate::error::{Result, SheetError};

/// Encode `img` as `format` into `out`.
///
/// `quality` (clamped to 1..=100) drives the lossy JPEG and WebP encoders
/// and is ignored for PNG. JPEG has no alpha channel, so transparent areas
/// come out black. A zero-area canvas cannot be encoded in any format.
pub fn encode_image<W: Write>(
    img: &RgbaImage,
    format: OutputFormat,
    quality: u8,
    mut out: W,
) -> Result<()> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(SheetError::Encode(format!(
            "cannot encode an empty {}x{} sheet",
            w, h
        )));
    }
    match format {
        OutputFormat::Png => {
            PngEncoder::new(out).write_image(img.as_raw(), w, h, ExtendedColorType::Rgba8)?;
        }
        OutputFormat::Jpeg => {
            let rgb = RgbImage::from_fn(w, h, |x, y| img.get_pixel(x, y).to_rgb());
            JpegEncoder::new_with_quality(out, quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                w,
                h,
                ExtendedColorType::Rgb8,
            )?;
        }
        OutputFormat::WebP => {
            let data = webp::Encoder::from_rgba(img.as_raw(), w, h)
                .encode_simple(false, quality.clamp(1, 100) as f32)
                .map_err(|e| SheetError::Encode(format!("webp: {:?}", e)))?;
            out.write_all(&data)?;
        }
    }
    debug!(%format, w, h, "encoded sheet");
    Ok(())
}

/// Encode `img` into a new file at `path`.
pub fn save_image(img: &RgbaImage, format: OutputFormat, quality: u8, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    encode_image(img, format, quality, &mut writer)?;
    writer.flush()?;
    Ok(())
}
