//! Export: encode the composited canvas into an image container.
//!
//! The container follows the background mode: a transparent background
//! needs alpha, so it exports as PNG; every other mode exports as JPEG.
//! Encoding failures are surfaced to the caller, never retried.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::layout::BackgroundMode;

/// Output container for an exported token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageContainer {
    /// Lossless, alpha-capable.
    Png,
    /// Lossy, no alpha channel.
    Jpeg,
}

impl ImageContainer {
    /// Container implied by a background mode: transparent backgrounds need
    /// alpha and export as PNG, everything else as JPEG.
    pub const fn for_background(mode: BackgroundMode) -> Self {
        if mode.is_transparent() {
            Self::Png
        } else {
            Self::Jpeg
        }
    }

    /// Conventional file extension.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Encoded token bytes plus the chosen container.
///
/// Transient: produced on export request, handed straight to whatever sink
/// persists it (file system, download, clipboard).
#[derive(Clone, Debug)]
pub struct RenderedArtifact {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Container the bytes were encoded into.
    pub container: ImageContainer,
}

impl RenderedArtifact {
    /// File extension matching the container.
    pub const fn extension(&self) -> &'static str {
        self.container.extension()
    }

    /// Conventional output filename: `token.png` or `token.jpg`.
    pub fn file_name(&self) -> String {
        format!("token.{}", self.extension())
    }
}

/// Encode the composited canvas under the given background mode.
///
/// JPEG has no alpha channel, so for non-transparent modes the canvas is
/// flattened by dropping alpha — fully transparent pixels come out black,
/// the same result a browser canvas gives when exporting JPEG.
pub fn export(dest: &RgbaImage, mode: BackgroundMode) -> Result<RenderedArtifact, EncodeError> {
    let container = ImageContainer::for_background(mode);
    let encodable = match container {
        ImageContainer::Png => DynamicImage::ImageRgba8(dest.clone()),
        ImageContainer::Jpeg => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(dest.clone()).into_rgb8())
        }
    };
    let mut bytes = Vec::new();
    encodable.write_to(&mut Cursor::new(&mut bytes), container.format())?;
    log::debug!(
        "exported {}x{} canvas as {} ({} bytes)",
        dest.width(),
        dest.height(),
        container.extension(),
        bytes.len()
    );
    Ok(RenderedArtifact { bytes, container })
}

/// Canvas serialization error. Fatal to the export attempt; the caller may
/// re-invoke export after fixing the underlying condition.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode canvas")]
pub struct EncodeError(#[from] image::ImageError);
