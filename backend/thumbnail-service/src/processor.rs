//! Thumbnail processor - generates thumbnails from original images
//!
//! Decodes an image in any format the `image` crate detects from its magic
//! bytes, fits it inside a bounding box while maintaining aspect ratio, drops
//! any alpha channel and encodes the result as JPEG.
//!
//! Uses `spawn_blocking` for the CPU-bound work so the async runtime is never stalled.

use crate::error::{Result, ThumbnailError};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Content type of every generated thumbnail
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

/// Configuration for thumbnail generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailConfig {
    /// Maximum width of the bounding box in pixels
    pub max_width: u32,
    /// Maximum height of the bounding box in pixels
    pub max_height: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_width: 150,
            max_height: 150,
            quality: 75,
        }
    }
}

/// Result of thumbnail generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// The thumbnail image data as JPEG
    pub data: Bytes,
    /// Width of the thumbnail
    pub width: u32,
    /// Height of the thumbnail
    pub height: u32,
}

impl Thumbnail {
    pub fn content_type(&self) -> &'static str {
        THUMBNAIL_CONTENT_TYPE
    }
}

/// Thumbnail processor
#[derive(Debug)]
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
}

impl ThumbnailProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ThumbnailConfig::default())
    }

    /// Generate a thumbnail from the given image data (blocking version)
    ///
    /// **Note:** This method performs CPU-intensive operations and should not be called
    /// directly from async code. Use `generate_async` instead.
    pub fn generate(&self, original_data: &[u8]) -> Result<Thumbnail> {
        let img = image::load_from_memory(original_data)
            .map_err(|e| ThumbnailError::UnsupportedImageFormat(e.to_string()))?;

        let (orig_w, orig_h) = img.dimensions();
        debug!(
            original_width = orig_w,
            original_height = orig_h,
            "Processing image for thumbnail"
        );

        let (new_w, new_h) =
            fit_within(orig_w, orig_h, self.config.max_width, self.config.max_height);

        let resized = if (new_w, new_h) == (orig_w, orig_h) {
            debug!("Image already within bounding box, encoding as-is");
            img
        } else {
            img.resize_exact(new_w, new_h, FilterType::Triangle)
        };

        let data = self.encode_jpeg(resized)?;

        debug!(
            width = new_w,
            height = new_h,
            size = data.len(),
            "Thumbnail generated"
        );

        Ok(Thumbnail {
            data,
            width: new_w,
            height: new_h,
        })
    }

    /// Generate a thumbnail on the blocking thread pool
    ///
    /// The original buffer is moved into the task and dropped when it finishes.
    pub async fn generate_async(self: Arc<Self>, original_data: Bytes) -> Result<Thumbnail> {
        tokio::task::spawn_blocking(move || self.generate(&original_data))
            .await
            .map_err(|e| ThumbnailError::Internal(format!("Thumbnail task panicked: {e}")))?
    }

    /// Encode image as JPEG, flattening alpha and high bit depths to 8-bit RGB
    fn encode_jpeg(&self, img: DynamicImage) -> Result<Bytes> {
        let rgb = DynamicImage::ImageRgb8(img.into_rgb8());

        let mut buf = Vec::new();
        rgb.write_to(
            &mut Cursor::new(&mut buf),
            ImageOutputFormat::Jpeg(self.config.quality),
        )
        .map_err(|e| ThumbnailError::ThumbnailEncode(e.to_string()))?;

        Ok(Bytes::from(buf))
    }
}

/// Fit `width`x`height` inside `max_width`x`max_height`, keeping aspect ratio
///
/// Never upscales: dimensions already inside the box are returned unchanged.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );

    let new_w = ((f64::from(width) * ratio).round() as u32).clamp(1, max_width.max(1));
    let new_h = ((f64::from(height) * ratio).round() as u32).clamp(1, max_height.max(1));
    (new_w, new_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, if x % 2 == 0 { 255 } else { 40 }])
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_fit_within_landscape() {
        assert_eq!(fit_within(1200, 800, 150, 150), (150, 100));
    }

    #[test]
    fn test_fit_within_portrait() {
        assert_eq!(fit_within(800, 1200, 150, 150), (100, 150));
    }

    #[test]
    fn test_fit_within_square() {
        assert_eq!(fit_within(1000, 1000, 150, 150), (150, 150));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(80, 40, 150, 150), (80, 40));
        assert_eq!(fit_within(150, 150, 150, 150), (150, 150));
    }

    #[test]
    fn test_fit_within_extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within(3000, 2, 150, 150), (150, 1));
    }

    #[test]
    fn test_fit_within_non_square_box() {
        assert_eq!(fit_within(400, 400, 200, 100), (100, 100));
    }

    #[test]
    fn test_generate_resizes_and_encodes_jpeg() {
        let processor = ThumbnailProcessor::with_defaults();
        let thumb = processor.generate(&png_bytes(600, 300)).unwrap();

        assert_eq!((thumb.width, thumb.height), (150, 75));
        assert_eq!(thumb.content_type(), "image/jpeg");
        assert_eq!(image::guess_format(&thumb.data).unwrap(), ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&thumb.data).unwrap();
        assert_eq!(decoded.dimensions(), (150, 75));
    }

    #[test]
    fn test_generate_keeps_small_images_at_original_size() {
        let processor = ThumbnailProcessor::with_defaults();
        let thumb = processor.generate(&png_bytes(40, 20)).unwrap();
        assert_eq!((thumb.width, thumb.height), (40, 20));
    }

    #[test]
    fn test_generate_rejects_non_image_payload() {
        let processor = ThumbnailProcessor::with_defaults();
        let err = processor
            .generate(b"just some text saved as photo.jpg")
            .unwrap_err();
        assert!(matches!(err, ThumbnailError::UnsupportedImageFormat(_)));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let processor = ThumbnailProcessor::with_defaults();
        let original = png_bytes(320, 240);
        let first = processor.generate(&original).unwrap();
        let second = processor.generate(&original).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_async_matches_blocking() {
        let processor = Arc::new(ThumbnailProcessor::with_defaults());
        let original = Bytes::from(png_bytes(300, 600));

        let expected = processor.generate(&original).unwrap();
        let actual = processor.clone().generate_async(original).await.unwrap();
        assert_eq!(actual, expected);
        assert_eq!((actual.width, actual.height), (75, 150));
    }
}
