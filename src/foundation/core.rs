use crate::foundation::math::wrap;

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Raster canvas extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Square extent, the shape the host environment supplies.
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// True when either dimension is zero; degenerate canvases still build
    /// a single-leaf composition but skip every drawing pass.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Full-extent rectangle at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Opaque color from channel values.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Black with the given alpha, used by the grain texture dots.
    pub fn black_with_alpha(alpha: f64) -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }
}

/// Convert an HSL color to straight RGBA8.
///
/// `hue` is in degrees (any value, wrapped into `[0, 360)`); `saturation`
/// and `lightness` are in `[0, 1]`. Cell fills use full saturation at half
/// lightness, the `hsl(h, 100%, 50%)` of the source material.
pub fn hsl_to_rgba8(hue: f64, saturation: f64, lightness: f64) -> Rgba8 {
    let h = wrap(hue, 0.0, 360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp {
        v if v < 1.0 => (c, x, 0.0),
        v if v < 2.0 => (x, c, 0.0),
        v if v < 3.0 => (0.0, c, x),
        v if v < 4.0 => (0.0, x, c),
        v if v < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;

    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba8::opaque(to_u8(r1), to_u8(g1), to_u8(b1))
}
