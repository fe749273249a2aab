//! Token image layout, compositing, and export for virtual tabletops.
//!
//! Turns an arbitrary raster image into a fixed-size square token: the
//! source is placed on the canvas by fill mode, anchor, scale, and offset,
//! optionally clipped to an inscribed circle, then encoded for download.
//!
//! # Modules
//!
//! - [`layout`] — placement geometry (fill modes, anchors, scale, offset);
//!   pure arithmetic, `no_std` compatible
//! - [`source`] — raw bytes → decoded source image (PNG/JPEG)
//! - [`compositor`] — clear, clip, and draw onto the destination canvas
//! - [`export`] — container choice and encoding
//! - [`render`] — the forward pipeline tying the above together

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod layout;

#[cfg(feature = "raster")]
pub mod compositor;
#[cfg(feature = "raster")]
pub mod export;
#[cfg(feature = "raster")]
pub mod render;
#[cfg(feature = "raster")]
pub mod source;

// Re-exports: core types from the layout module
pub use layout::{
    Anchor, Anchor1D, BackgroundMode, FillMode, LayoutError, PlacementRect, SCALE_DEFAULT,
    SCALE_MAX, SCALE_MIN, TokenLayout,
};

#[cfg(feature = "raster")]
pub use compositor::{composite, fill_background};
#[cfg(feature = "raster")]
pub use export::{EncodeError, ImageContainer, RenderedArtifact, export};
#[cfg(feature = "raster")]
pub use render::{Renderer, render};
#[cfg(feature = "raster")]
pub use source::{DecodeError, SourceImage};
