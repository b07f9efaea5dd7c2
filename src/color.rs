//! 8-bit RGB colors and the color math effects need.
//!
//! Effects store colors the way the strip driver wants them, one byte per
//! channel. Blending and HSV conversion go through `palette` in floating point
//! and come back as [`Rgb`].

use palette::{FromColor, Hsv, Mix, Srgb};

/// An 8-bit-per-channel RGB color, as sent to the LED strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales every channel by `brightness / 256`, keeping full brightness lossless.
    ///
    /// Same rounding as the strip driver's `scale8`, so `255` returns the color
    /// unchanged and `0` returns black.
    #[inline]
    pub fn scale(self, brightness: u8) -> Self {
        let scale = |c: u8| ((c as u16 * (brightness as u16 + 1)) >> 8) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Linear blend from `self` (at `0.0`) to `other` (at `1.0`).
    ///
    /// `progress` is clamped to the unit range.
    pub fn blend(self, other: Rgb, progress: f32) -> Self {
        let from: Srgb<f32> = Srgb::<u8>::from(self).into_format();
        let to: Srgb<f32> = Srgb::<u8>::from(other).into_format();
        let mixed = from.mix(to, progress.clamp(0.0, 1.0));
        mixed.into_format::<u8>().into()
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(color: Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(color: Rgb) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

/// Creates a color from HSV components.
///
/// `hue` is in degrees and wraps, `saturation` and `value` are in `0.0..=1.0`.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Rgb {
    let hsv = Hsv::new(hue, saturation.clamp(0.0, 1.0), value.clamp(0.0, 1.0));
    Srgb::from_color(hsv).into_format::<u8>().into()
}

/// Creates a fully saturated, full-value color from a hue in degrees.
#[inline]
pub fn hue(hue: f32) -> Rgb {
    hsv(hue, 1.0, 1.0)
}
