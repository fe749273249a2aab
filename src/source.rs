//! Source image acquisition: raw bytes → decoded raster.
//!
//! Accepts the containers the token generator supports (PNG and JPEG),
//! rejects everything else up front, and exposes the decoded pixels plus
//! natural dimensions to the compositor. The decoded image is never
//! mutated downstream.

use std::path::Path;

use image::{DynamicImage, ImageFormat};

/// A decoded source raster with its natural dimensions.
///
/// Owned by the caller; the render pipeline only reads dimensions and
/// pixel content.
#[derive(Clone, Debug)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    /// Decode a source image from raw file bytes.
    ///
    /// Only PNG and JPEG containers are accepted. The container is sniffed
    /// from the bytes, not from any filename.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let format = image::guess_format(bytes).map_err(|_| DecodeError::UnknownContainer)?;
        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
            return Err(DecodeError::UnsupportedFormat(format));
        }
        let image = image::load_from_memory_with_format(bytes, format)?;
        log::debug!(
            "decoded {format:?} source: {}x{}",
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    /// Read and decode a source image from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an already decoded raster.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The decoded pixels.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Source image acquisition error.
///
/// Never recovered from partially: the compositor is only ever handed a
/// fully decoded image.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes match no known image container.
    #[error("unrecognized image container")]
    UnknownContainer,
    /// A known container, but not one the token generator accepts.
    #[error("unsupported image container {0:?} (PNG and JPEG are accepted)")]
    UnsupportedFormat(ImageFormat),
    /// The container was recognized but its contents failed to decode.
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),
    /// The file could not be read.
    #[error("failed to read image file")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        // RGB (not RGBA) so the same helper can target JPEG too.
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30])));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn decodes_png_bytes() {
        let src = SourceImage::from_bytes(&encoded(ImageFormat::Png)).unwrap();
        assert_eq!((src.width(), src.height()), (8, 6));
    }

    #[test]
    fn decodes_jpeg_bytes() {
        let src = SourceImage::from_bytes(&encoded(ImageFormat::Jpeg)).unwrap();
        assert_eq!((src.width(), src.height()), (8, 6));
    }

    #[test]
    fn rejects_other_containers() {
        let err = SourceImage::from_bytes(&encoded(ImageFormat::Bmp)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedFormat(ImageFormat::Bmp)
        ));
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = SourceImage::from_bytes(b"not an image at all").unwrap_err();
        assert!(matches!(err, DecodeError::UnknownContainer));
    }

    #[test]
    fn rejects_truncated_png() {
        let mut bytes = encoded(ImageFormat::Png);
        bytes.truncate(20); // keeps the signature, loses the data
        let err = SourceImage::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Decode(_)));
    }
}
