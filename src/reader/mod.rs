//! QR symbol reading
//!
//! The SHC pipeline only needs the text stored in a QR code. This module defines the
//! reader seam and ships an image-based reader for files and byte buffers.

use image::{DynamicImage, GenericImageView, GrayImage};
use tracing::debug;

use crate::decoder::prefix::is_shc_text;

/// Anything that can pull QR text out of encoded image bytes
///
/// `None` means no decodable QR symbol was found. Implementations swallow their own
/// errors so callers only ever see "found" or "not found".
pub trait QrReader {
    /// Return the text of the first QR symbol in the image
    fn read_text(&self, image: &[u8]) -> Option<String>;
}

impl<F> QrReader for F
where
    F: Fn(&[u8]) -> Option<String>,
{
    fn read_text(&self, image: &[u8]) -> Option<String> {
        self(image)
    }
}

/// Reader settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Downscale images whose longest side exceeds this many pixels
    pub max_dim: Option<u32>,
}

impl ReaderConfig {
    /// Config with a downscale bound; 0 disables downscaling
    pub fn with_max_dim(max_dim: u32) -> Self {
        Self {
            max_dim: (max_dim > 0).then_some(max_dim),
        }
    }
}

/// QR reader for PNG/JPEG/... image bytes
#[derive(Debug, Clone, Default)]
pub struct ImageQrReader {
    config: ReaderConfig,
}

impl ImageQrReader {
    /// Create a reader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with explicit settings
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> ReaderConfig {
        self.config
    }
}

impl QrReader for ImageQrReader {
    fn read_text(&self, image: &[u8]) -> Option<String> {
        let luma = match load_luma(image, self.config.max_dim) {
            Ok(luma) => luma,
            Err(err) => {
                debug!(%err, "image could not be decoded");
                return None;
            }
        };

        let (width, height) = luma.dimensions();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                luma.get_pixel(x as u32, y as u32).0[0]
            });

        let grids = prepared.detect_grids();
        debug!(width, height, grids = grids.len(), "located QR grids");

        // Prefer an SHC symbol when the image holds several QR codes
        let mut fallback = None;
        for (idx, grid) in grids.iter().enumerate() {
            match grid.decode() {
                Ok((_meta, content)) if is_shc_text(&content) => return Some(content),
                Ok((_meta, content)) => {
                    debug!(grid = idx, "QR grid is not an SHC payload");
                    fallback.get_or_insert(content);
                }
                Err(err) => debug!(grid = idx, %err, "QR grid failed to decode"),
            }
        }
        fallback
    }
}

/// Decode image bytes into 8-bit luma, downscaling if larger than `max_dim`
pub fn load_luma(bytes: &[u8], max_dim: Option<u32>) -> Result<GrayImage, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    Ok(downscale(img, max_dim).to_luma8())
}

fn downscale(img: DynamicImage, max_dim: Option<u32>) -> DynamicImage {
    let Some(max_dim) = max_dim else {
        return img;
    };
    let (orig_w, orig_h) = img.dimensions();
    if orig_w.max(orig_h) <= max_dim {
        return img;
    }
    debug!(orig_w, orig_h, max_dim, "downscaling image");
    img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Luma};
    use std::io::Cursor;

    fn blank_png(width: u32, height: u32) -> Vec<u8> {
        let img = GrayImage::from_pixel(width, height, Luma([255u8]));
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_empty_bytes_not_found() {
        assert!(ImageQrReader::new().read_text(&[]).is_none());
    }

    #[test]
    fn test_garbage_bytes_not_found() {
        assert!(ImageQrReader::new().read_text(b"not an image").is_none());
    }

    #[test]
    fn test_blank_image_not_found() {
        assert!(ImageQrReader::new().read_text(&blank_png(64, 64)).is_none());
    }

    #[test]
    fn test_downscale() {
        let luma = load_luma(&blank_png(400, 200), Some(100)).unwrap();
        assert_eq!(luma.dimensions(), (100, 50));
        let luma = load_luma(&blank_png(80, 40), Some(100)).unwrap();
        assert_eq!(luma.dimensions(), (80, 40));
    }

    #[test]
    fn test_config_zero_disables_downscale() {
        assert_eq!(ReaderConfig::with_max_dim(0).max_dim, None);
        assert_eq!(ReaderConfig::with_max_dim(800).max_dim, Some(800));
    }

    #[test]
    fn test_closure_reader() {
        let reader = |_: &[u8]| Some("shc:/56".to_string());
        assert_eq!(reader.read_text(&[]).as_deref(), Some("shc:/56"));
    }
}
