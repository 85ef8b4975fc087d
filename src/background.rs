//! Launcher background image decoding

use anyhow::{anyhow, Context, Result};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// RGBA8 pixels ready to upload as a texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode the PNG at `path`; any failure means "no background"
pub fn load(path: &Path) -> Option<DecodedImage> {
    match std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .and_then(|bytes| decode_png(&bytes))
    {
        Ok(image) => {
            info!(path = %path.display(), width = image.width, height = image.height, "Loaded background image");
            Some(image)
        }
        Err(e) => {
            debug!(path = %path.display(), error = ?e, "No background image");
            None
        }
    }
}

/// Decode PNG bytes to RGBA8 regardless of the source colour type
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().context("Failed to read PNG header")?;

    let (color_type, _) = reader.output_color_type();
    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let mut buf = vec![0; width as usize * height as usize * color_type.samples()];
    let info = reader.next_frame(&mut buf).context("Failed to decode PNG frame")?;
    let pixels = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => {
            // Convert RGB to RGBA
            let mut out = Vec::with_capacity(pixels.len() / 3 * 4);
            for chunk in pixels.chunks_exact(3) {
                out.extend_from_slice(chunk);
                out.push(0xFF);
            }
            out
        }
        png::ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(pixels.len() * 2);
            for chunk in pixels.chunks_exact(2) {
                out.extend_from_slice(&[chunk[0], chunk[0], chunk[0], chunk[1]]);
            }
            out
        }
        png::ColorType::Grayscale => {
            let mut out = Vec::with_capacity(pixels.len() * 4);
            for &v in pixels {
                out.extend_from_slice(&[v, v, v, 0xFF]);
            }
            out
        }
        other => {
            return Err(anyhow!(
                "Unsupported PNG color type {:?} after expansion",
                other
            ))
        }
    };

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        rgba,
    })
}
