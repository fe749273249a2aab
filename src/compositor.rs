//! Compositing: draw a placed source image onto the destination canvas.
//!
//! The compositor owns the only mutation in the pipeline. Every call starts
//! from a cleared canvas, so rapid successive re-renders never accumulate
//! stale pixels, and a composite with identical inputs is idempotent.
//!
//! The circular mask is a clip, not a post-effect: pixels outside the
//! inscribed circle are simply never written. Because the clip predicate
//! lives inside the draw loop there is no graphics-state save/restore pair
//! to unbalance.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::layout::{BackgroundMode, PlacementRect};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Draw `source` onto `dest` at the resolved placement.
///
/// Steps, in order:
/// 1. Clear `dest` to fully transparent.
/// 2. If `mask_enabled`, restrict drawing to the circle inscribed in the
///    canvas: center `(dW/2, dH/2)`, radius `min(dW, dH)/2`.
/// 3. Resample `source` to the rect's dimensions (bilinear) and copy it in
///    at the rect's origin, clipping whatever falls outside the canvas.
///
/// The fractional rect is rounded to whole pixels at draw time only; `rect`
/// itself is untouched, as is `source`. A rect whose width or height rounds
/// to zero clears the canvas and draws nothing.
pub fn composite(
    dest: &mut RgbaImage,
    source: &DynamicImage,
    rect: &PlacementRect,
    mask_enabled: bool,
) {
    for pixel in dest.pixels_mut() {
        *pixel = TRANSPARENT;
    }

    let scaled_w = rect.width.round() as i64;
    let scaled_h = rect.height.round() as i64;
    if scaled_w <= 0 || scaled_h <= 0 {
        return;
    }

    let clip = mask_enabled.then(|| CircleClip::inscribed(dest.width(), dest.height()));

    // Resample first, then copy row by row with bounds and clip checks.
    // The canvas was just cleared, so a straight copy is exact source-over.
    let scaled = source
        .resize_exact(scaled_w as u32, scaled_h as u32, FilterType::Triangle)
        .into_rgba8();

    let origin_x = rect.x.round() as i64;
    let origin_y = rect.y.round() as i64;
    let (dest_w, dest_h) = (dest.width() as i64, dest.height() as i64);

    for (sx, sy, pixel) in scaled.enumerate_pixels() {
        let dx = origin_x + sx as i64;
        let dy = origin_y + sy as i64;
        if dx < 0 || dy < 0 || dx >= dest_w || dy >= dest_h {
            continue;
        }
        if let Some(clip) = &clip
            && !clip.contains(dx as u32, dy as u32)
        {
            continue;
        }
        dest.put_pixel(dx as u32, dy as u32, *pixel);
    }
}

/// Paint the canvas background for the given mode.
///
/// Extension point, currently a no-op for every mode: the original design
/// declares solid/guessed/picked backgrounds but never fills the canvas —
/// only the export container reacts to non-transparent modes. Wiring a real
/// fill belongs between the clear and the draw in [`composite`].
pub fn fill_background(dest: &mut RgbaImage, mode: BackgroundMode) {
    let _ = (dest, mode);
}

/// The circle inscribed in a canvas, used as a clip region.
#[derive(Copy, Clone, Debug)]
struct CircleClip {
    center_x: f64,
    center_y: f64,
    radius: f64,
}

impl CircleClip {
    fn inscribed(width: u32, height: u32) -> Self {
        Self {
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            radius: width.min(height) as f64 / 2.0,
        }
    }

    /// Whether the center of pixel `(x, y)` lies within the circle.
    fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as f64 + 0.5 - self.center_x;
        let dy = y as f64 + 0.5 - self.center_y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FillMode, TokenLayout};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn red_source(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, RED))
    }

    fn full_rect(size: u32) -> PlacementRect {
        PlacementRect::new(0.0, 0.0, size as f64, size as f64)
    }

    // ── drawing ─────────────────────────────────────────────────────────

    #[test]
    fn unmasked_draw_covers_canvas() {
        let mut dest = RgbaImage::new(64, 64);
        composite(&mut dest, &red_source(64, 64), &full_rect(64), false);
        assert!(dest.pixels().all(|p| *p == RED));
    }

    #[test]
    fn draw_at_offset_leaves_margins_transparent() {
        let mut dest = RgbaImage::new(64, 64);
        let rect = PlacementRect::new(16.0, 16.0, 32.0, 32.0);
        composite(&mut dest, &red_source(32, 32), &rect, false);
        assert_eq!(*dest.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*dest.get_pixel(15, 15), TRANSPARENT);
        assert_eq!(*dest.get_pixel(16, 16), RED);
        assert_eq!(*dest.get_pixel(47, 47), RED);
        assert_eq!(*dest.get_pixel(48, 48), TRANSPARENT);
    }

    #[test]
    fn negative_origin_clips_without_panicking() {
        let mut dest = RgbaImage::new(32, 32);
        let rect = PlacementRect::new(-16.0, -16.0, 64.0, 64.0);
        composite(&mut dest, &red_source(64, 64), &rect, false);
        assert!(dest.pixels().all(|p| *p == RED));
    }

    #[test]
    fn zero_sized_rect_draws_nothing() {
        let mut dest = RgbaImage::new(32, 32);
        let rect = PlacementRect::new(16.0, 16.0, 0.0, 0.0);
        composite(&mut dest, &red_source(64, 64), &rect, false);
        assert!(dest.pixels().all(|p| *p == TRANSPARENT));
    }

    // ── clear-first semantics ───────────────────────────────────────────

    #[test]
    fn recomposite_leaves_no_stale_pixels() {
        let mut dest = RgbaImage::new(64, 64);
        composite(&mut dest, &red_source(64, 64), &full_rect(64), false);
        // Second render places a small image top-left; the rest must be
        // cleared, not left over from the first render.
        let rect = PlacementRect::new(0.0, 0.0, 8.0, 8.0);
        composite(&mut dest, &red_source(8, 8), &rect, false);
        assert_eq!(*dest.get_pixel(0, 0), RED);
        assert_eq!(*dest.get_pixel(32, 32), TRANSPARENT);
        assert_eq!(*dest.get_pixel(63, 63), TRANSPARENT);
    }

    #[test]
    fn composite_is_idempotent() {
        let source = red_source(48, 24);
        let rect = TokenLayout::new(FillMode::Fit, 64).compute(48, 24).unwrap();
        let mut a = RgbaImage::new(64, 64);
        let mut b = RgbaImage::new(64, 64);
        composite(&mut a, &source, &rect, true);
        composite(&mut b, &source, &rect, true);
        composite(&mut b, &source, &rect, true);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    // ── mask geometry ───────────────────────────────────────────────────

    #[test]
    fn mask_clears_outside_inscribed_circle() {
        let size = 100u32;
        let mut dest = RgbaImage::new(size, size);
        composite(&mut dest, &red_source(100, 100), &full_rect(size), true);

        let r = size as f64 / 2.0;
        for (x, y, pixel) in dest.enumerate_pixels() {
            let dx = x as f64 + 0.5 - r;
            let dy = y as f64 + 0.5 - r;
            let inside = dx * dx + dy * dy <= r * r;
            if inside {
                assert_eq!(*pixel, RED, "({x},{y}) inside circle");
            } else {
                assert_eq!(*pixel, TRANSPARENT, "({x},{y}) outside circle");
            }
        }
    }

    #[test]
    fn mask_corners_are_transparent() {
        let mut dest = RgbaImage::new(64, 64);
        composite(&mut dest, &red_source(64, 64), &full_rect(64), true);
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(*dest.get_pixel(x, y), TRANSPARENT);
        }
        assert_eq!(*dest.get_pixel(32, 32), RED);
    }

    #[test]
    fn fill_background_is_a_no_op_for_every_mode() {
        let modes = [
            BackgroundMode::Transparent,
            BackgroundMode::Solid { r: 1, g: 2, b: 3 },
            BackgroundMode::Guess,
            BackgroundMode::Pick,
        ];
        for mode in modes {
            let mut dest = RgbaImage::new(8, 8);
            fill_background(&mut dest, mode);
            assert!(dest.pixels().all(|p| *p == TRANSPARENT));
        }
    }
}
