//! The forward render pipeline: configuration → resolver → compositor.
//!
//! Data flows strictly one way. Every render recomputes the placement from
//! current inputs and redraws the whole canvas from a cleared state; nothing
//! is cached between triggers, so rapid reconfiguration can never show a
//! stale frame.

use image::RgbaImage;

use crate::compositor::composite;
use crate::export::{EncodeError, RenderedArtifact, export};
use crate::layout::{LayoutError, TokenLayout};
use crate::source::SourceImage;

/// Render a token onto a fresh canvas.
///
/// One-shot form of the pipeline: resolve placement, allocate the square
/// canvas, composite. The caller passes the result to
/// [`export`](crate::export::export) when ready.
pub fn render(source: &SourceImage, layout: &TokenLayout) -> Result<RgbaImage, LayoutError> {
    let rect = layout.compute(source.width(), source.height())?;
    log::debug!(
        "placing {}x{} source at ({:.2}, {:.2}) size {:.2}x{:.2} on {}px canvas",
        source.width(),
        source.height(),
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        layout.output_size()
    );
    let mut canvas = RgbaImage::new(layout.output_size(), layout.output_size());
    composite(&mut canvas, source.image(), &rect, layout.mask_enabled());
    Ok(canvas)
}

/// Retained renderer that owns the destination canvas.
///
/// The canvas has a single writer: rendering takes `&mut self`, export
/// borrows `&self`, so the borrow checker serializes "reconfigure" against
/// "export" — an export always sees the most recent completed composite.
#[derive(Clone, Debug)]
pub struct Renderer {
    layout: TokenLayout,
    canvas: RgbaImage,
}

impl Renderer {
    /// Create a renderer with a blank canvas for the given configuration.
    pub fn new(layout: TokenLayout) -> Self {
        let canvas = RgbaImage::new(layout.output_size(), layout.output_size());
        Self { layout, canvas }
    }

    /// Current configuration.
    pub fn layout(&self) -> &TokenLayout {
        &self.layout
    }

    /// Replace the configuration. Takes effect on the next [`render`](Self::render).
    pub fn set_layout(&mut self, layout: TokenLayout) {
        self.layout = layout;
    }

    /// Recompute placement and redraw the canvas from the given source.
    pub fn render(&mut self, source: &SourceImage) -> Result<&RgbaImage, LayoutError> {
        let rect = self.layout.compute(source.width(), source.height())?;
        let size = self.layout.output_size();
        if self.canvas.width() != size || self.canvas.height() != size {
            self.canvas = RgbaImage::new(size, size);
        }
        composite(
            &mut self.canvas,
            source.image(),
            &rect,
            self.layout.mask_enabled(),
        );
        Ok(&self.canvas)
    }

    /// The canvas as last composited.
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Encode the current canvas under the configured background mode.
    pub fn export(&self) -> Result<RenderedArtifact, EncodeError> {
        export(&self.canvas, self.layout.background_mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BackgroundMode, FillMode};
    use image::{DynamicImage, Rgba};

    fn source(w: u32, h: u32) -> SourceImage {
        SourceImage::from_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            w,
            h,
            Rgba([0, 255, 0, 255]),
        )))
    }

    #[test]
    fn render_produces_square_canvas() {
        let canvas = render(&source(400, 200), &TokenLayout::new(FillMode::Fit, 128)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (128, 128));
    }

    #[test]
    fn render_rejects_zero_output() {
        let err = render(&source(10, 10), &TokenLayout::new(FillMode::Fit, 0)).unwrap_err();
        assert_eq!(err, LayoutError::InvalidOutputDimension);
    }

    #[test]
    fn reconfigure_resizes_canvas_on_next_render() {
        let mut renderer = Renderer::new(TokenLayout::new(FillMode::Cover, 64));
        renderer.render(&source(100, 100)).unwrap();
        assert_eq!(renderer.canvas().width(), 64);

        renderer.set_layout(TokenLayout::new(FillMode::Cover, 96));
        renderer.render(&source(100, 100)).unwrap();
        assert_eq!(renderer.canvas().width(), 96);
    }

    #[test]
    fn export_reflects_background_mode() {
        let mut renderer = Renderer::new(
            TokenLayout::new(FillMode::Cover, 32).background(BackgroundMode::Guess),
        );
        renderer.render(&source(64, 64)).unwrap();
        assert_eq!(renderer.export().unwrap().extension(), "jpg");

        renderer.set_layout(TokenLayout::new(FillMode::Cover, 32));
        renderer.render(&source(64, 64)).unwrap();
        assert_eq!(renderer.export().unwrap().extension(), "png");
    }
}
