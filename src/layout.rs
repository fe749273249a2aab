//! Placement geometry for token rendering.
//!
//! Computes where a source image lands on the square destination canvas
//! from a fill mode, anchor, scale, and pixel offset. Pure arithmetic — no
//! pixel operations, no allocations, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use tokenforge::{FillMode, TokenLayout};
//!
//! let rect = TokenLayout::new(FillMode::Fit, 200)
//!     .compute(100, 100)
//!     .unwrap();
//!
//! // A 100×100 source is smaller than the canvas: placed as-is, centered.
//! assert_eq!((rect.x, rect.y), (50.0, 50.0));
//! assert_eq!((rect.width, rect.height), (100.0, 100.0));
//! ```

/// How the source image fills the destination canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Scale to fit entirely within the canvas, preserving aspect ratio.
    /// May leave empty margins; anchor, scale, and offset apply on top.
    #[default]
    Fit,
    /// Scale to cover the canvas completely, cropping the overflow axis.
    /// Anchor and scale are ignored; offset still applies.
    Cover,
}

/// 1D anchor position along a single axis.
///
/// Resolves the coordinate of a scaled length within a destination length.
/// When the scaled length exceeds the destination, `Center` centers the
/// overflow symmetrically instead of clipping toward one side — the same
/// `(dest - scaled) / 2` expression covers both cases.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor1D {
    /// Pin flush to the near edge (left or top).
    Near,
    /// Center on the axis.
    #[default]
    Center,
    /// Pin flush to the far edge (right or bottom).
    Far,
}

impl Anchor1D {
    /// Coordinate of a `scaled`-length span within a `dest`-length span.
    pub fn resolve(self, scaled: f64, dest: f64) -> f64 {
        match self {
            Self::Near => 0.0,
            Self::Center => (dest - scaled) / 2.0,
            Self::Far => dest - scaled,
        }
    }
}

/// Numpad-style anchor: which of nine positions the image gravitates to.
///
/// `7 8 9` is the top row, `4 5 6` the middle, `1 2 3` the bottom, matching
/// the key layout of a numeric keypad. Default is `5` (center).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Create from a numpad digit (1–9).
    ///
    /// Any other value falls back to [`Anchor::Center`]; anchor input comes
    /// from constrained UI controls, so malformed values are tolerated
    /// rather than rejected.
    pub const fn from_numpad(value: u8) -> Self {
        match value {
            7 => Self::TopLeft,
            8 => Self::TopCenter,
            9 => Self::TopRight,
            4 => Self::MiddleLeft,
            6 => Self::MiddleRight,
            1 => Self::BottomLeft,
            2 => Self::BottomCenter,
            3 => Self::BottomRight,
            _ => Self::Center,
        }
    }

    /// Convert back to the numpad digit (1–9).
    pub const fn to_numpad(self) -> u8 {
        match self {
            Self::TopLeft => 7,
            Self::TopCenter => 8,
            Self::TopRight => 9,
            Self::MiddleLeft => 4,
            Self::Center => 5,
            Self::MiddleRight => 6,
            Self::BottomLeft => 1,
            Self::BottomCenter => 2,
            Self::BottomRight => 3,
        }
    }

    /// Decompose into per-axis anchors `(horizontal, vertical)`.
    pub const fn axes(self) -> (Anchor1D, Anchor1D) {
        match self {
            Self::TopLeft => (Anchor1D::Near, Anchor1D::Near),
            Self::TopCenter => (Anchor1D::Center, Anchor1D::Near),
            Self::TopRight => (Anchor1D::Far, Anchor1D::Near),
            Self::MiddleLeft => (Anchor1D::Near, Anchor1D::Center),
            Self::Center => (Anchor1D::Center, Anchor1D::Center),
            Self::MiddleRight => (Anchor1D::Far, Anchor1D::Center),
            Self::BottomLeft => (Anchor1D::Near, Anchor1D::Far),
            Self::BottomCenter => (Anchor1D::Center, Anchor1D::Far),
            Self::BottomRight => (Anchor1D::Far, Anchor1D::Far),
        }
    }
}

/// Background treatment for the destination canvas.
///
/// Only the transparent/non-transparent distinction is acted on today: it
/// selects the export container (PNG keeps alpha, JPEG does not). The
/// non-transparent variants are declared for the configuration surface but
/// no background fill is painted yet — see
/// [`fill_background`](crate::compositor::fill_background).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackgroundMode {
    /// Keep the canvas transparent outside the drawn image.
    #[default]
    Transparent,
    /// Fill with a solid sRGB color.
    Solid { r: u8, g: u8, b: u8 },
    /// Derive a fill color from the source image edges.
    Guess,
    /// Color picked interactively from the source image.
    Pick,
}

impl BackgroundMode {
    /// Whether the canvas background stays transparent.
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }
}

/// Where the source image lands on the destination canvas, in destination
/// pixel space.
///
/// Coordinates and dimensions are fractional: the resolver never rounds,
/// so sub-pixel placement survives until rasterization. Recomputed from
/// scratch on every [`TokenLayout::compute`] call — never cached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRect {
    /// Left edge. May be negative (overflow past the left canvas edge).
    pub x: f64,
    /// Top edge. May be negative.
    pub y: f64,
    /// Drawn width in destination pixels.
    pub width: f64,
    /// Drawn height in destination pixels.
    pub height: f64,
}

impl PlacementRect {
    /// Create a new placement rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Scale values outside this range fall back to [`SCALE_DEFAULT`].
pub const SCALE_MAX: i32 = 400;
/// Lower bound of the accepted scale range. Zero is legal and draws nothing.
pub const SCALE_MIN: i32 = 0;
/// Neutral scale percentage.
pub const SCALE_DEFAULT: i32 = 100;

/// Layout configuration for one token render.
///
/// An immutable snapshot of every layout control. The destination canvas is
/// always square: height is locked to `output_size`.
///
/// # Example
///
/// ```
/// use tokenforge::{Anchor, FillMode, TokenLayout};
///
/// let rect = TokenLayout::new(FillMode::Fit, 200)
///     .anchor(Anchor::TopLeft)
///     .scale_percent(50)
///     .offset(10, -5)
///     .compute(400, 400)
///     .unwrap();
///
/// assert_eq!((rect.width, rect.height), (100.0, 100.0));
/// assert_eq!((rect.x, rect.y), (10.0, -5.0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TokenLayout {
    fill_mode: FillMode,
    output_size: u32,
    anchor: Anchor,
    scale_percent: i32,
    offset_x: i32,
    offset_y: i32,
    mask: bool,
    background: BackgroundMode,
}

impl TokenLayout {
    /// Create a layout with the given fill mode and square canvas size.
    ///
    /// Defaults: anchor 5 (center), scale 100%, offset (0, 0), circular
    /// mask enabled, transparent background.
    pub const fn new(fill_mode: FillMode, output_size: u32) -> Self {
        Self {
            fill_mode,
            output_size,
            anchor: Anchor::Center,
            scale_percent: SCALE_DEFAULT,
            offset_x: 0,
            offset_y: 0,
            mask: true,
            background: BackgroundMode::Transparent,
        }
    }

    /// Set the anchor position.
    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the anchor from a numpad digit (1–9); other values mean center.
    pub const fn numpad_anchor(mut self, value: u8) -> Self {
        self.anchor = Anchor::from_numpad(value);
        self
    }

    /// Set the scale percentage.
    ///
    /// Values outside `[SCALE_MIN, SCALE_MAX]` are kept as given and treated
    /// as [`SCALE_DEFAULT`] during [`compute`](Self::compute) — tolerant
    /// UI-driven input, not an error.
    pub const fn scale_percent(mut self, percent: i32) -> Self {
        self.scale_percent = percent;
        self
    }

    /// Set the pixel offset applied after anchoring.
    ///
    /// Each component is clamped to `[-output_size, +output_size]`.
    pub fn offset(mut self, x: i32, y: i32) -> Self {
        let limit = self.output_size.min(i32::MAX as u32) as i32;
        self.offset_x = x.clamp(-limit, limit);
        self.offset_y = y.clamp(-limit, limit);
        self
    }

    /// Enable or disable the inscribed-circle mask.
    pub const fn mask(mut self, enabled: bool) -> Self {
        self.mask = enabled;
        self
    }

    /// Set the background mode.
    pub const fn background(mut self, mode: BackgroundMode) -> Self {
        self.background = mode;
        self
    }

    /// Square canvas edge length in pixels.
    pub const fn output_size(&self) -> u32 {
        self.output_size
    }

    /// Whether the inscribed-circle mask is enabled.
    pub const fn mask_enabled(&self) -> bool {
        self.mask
    }

    /// The configured background mode.
    pub const fn background_mode(&self) -> BackgroundMode {
        self.background
    }

    /// The configured offset `(x, y)` after clamping.
    pub const fn offsets(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Resolve the placement rect for a source of the given dimensions.
    ///
    /// Pure: identical inputs always produce an identical rect. O(1)
    /// arithmetic, cheap enough to call on every pointer-move of an
    /// interactive control.
    ///
    /// Errors if the source has a zero dimension or the canvas size is
    /// zero. Malformed anchor or scale values never error (see
    /// [`scale_percent`](Self::scale_percent)).
    pub fn compute(&self, source_w: u32, source_h: u32) -> Result<PlacementRect, LayoutError> {
        if source_w == 0 || source_h == 0 {
            return Err(LayoutError::InvalidSourceDimension);
        }
        if self.output_size == 0 {
            return Err(LayoutError::InvalidOutputDimension);
        }

        // Canvas is square by construction: dest width == dest height.
        let dest = self.output_size as f64;
        let sw = source_w as f64;
        let sh = source_h as f64;
        // Aspect comparison on integers — exact, no float-equality hazard.
        let square = source_w == source_h;
        let wide = source_w > source_h;
        let ratio = sw / sh;

        let (width, height, mut x, mut y) = match self.fill_mode {
            FillMode::Fit => {
                // `small` only when the source is smaller on *both* axes:
                // such sources are placed at natural size instead of being
                // upscaled to the canvas edge.
                let small = source_w < self.output_size && source_h < self.output_size;
                let (base_w, base_h) = if square {
                    let w = if small { sw } else { dest };
                    (w, w)
                } else if wide {
                    let w = if small { sw } else { dest };
                    (w, w / ratio)
                } else {
                    let h = if small { sh } else { dest };
                    (h * ratio, h)
                };

                let scale = effective_scale(self.scale_percent) as f64 / 100.0;
                let w = base_w * scale;
                let h = base_h * scale;

                let (ax, ay) = self.anchor.axes();
                (w, h, ax.resolve(w, dest), ay.resolve(h, dest))
            }

            FillMode::Cover => {
                // Always fills the canvas, cropping the longer axis.
                // Anchor and scale do not participate.
                if square {
                    (dest, dest, 0.0, 0.0)
                } else if wide {
                    let w = dest * ratio;
                    (w, dest, (dest - w) / 2.0, 0.0)
                } else {
                    let h = dest / ratio;
                    (dest, h, 0.0, (dest - h) / 2.0)
                }
            }
        };

        x += self.offset_x as f64;
        y += self.offset_y as f64;

        Ok(PlacementRect {
            x,
            y,
            width,
            height,
        })
    }
}

/// Scale percentage actually applied: out-of-range values mean "no scale".
const fn effective_scale(percent: i32) -> i32 {
    if percent >= SCALE_MIN && percent <= SCALE_MAX {
        percent
    } else {
        SCALE_DEFAULT
    }
}

/// Placement computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Source image has a zero width or height.
    InvalidSourceDimension,
    /// Canvas size is zero.
    InvalidOutputDimension,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSourceDimension => write!(f, "source width and height must be positive"),
            Self::InvalidOutputDimension => write!(f, "output size must be positive"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
