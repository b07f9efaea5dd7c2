//! Parameter records for the individual animation phases.
//!
//! These describe a run of LEDs ("strip") moving along the main strip. Every
//! length and delay is unsigned, so none of them can go negative.

use crate::color::Rgb;

/// A moving strip during the explosion phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplosionParams {
    pub color1: Rgb,
    pub color2: Rgb,
    pub speed_delay: u16,
    pub strip_length: u16,
    /// How far the strip travels from its origin, in LEDs.
    pub move_range: u16,
}

impl ExplosionParams {
    pub fn new(
        color1: Rgb,
        color2: Rgb,
        speed_delay: u16,
        strip_length: u16,
        move_range: u16,
    ) -> Self {
        Self {
            color1,
            color2,
            speed_delay,
            strip_length,
            move_range,
        }
    }

    /// LEDs covered by the strip over its whole travel.
    pub fn span(&self) -> u32 {
        self.strip_length as u32 + self.move_range as u32
    }

    pub fn fits(&self, led_count: u16) -> bool {
        self.span() <= led_count as u32
    }
}

/// The rising phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AscendParams {
    pub peak_brightness: u8,
    pub speed_delay: u16,
    pub strip_length: u16,
}

impl AscendParams {
    pub fn new(peak_brightness: u8, speed_delay: u16, strip_length: u16) -> Self {
        Self {
            peak_brightness,
            speed_delay,
            strip_length,
        }
    }

    pub fn span(&self) -> u32 {
        self.strip_length as u32
    }

    pub fn fits(&self, led_count: u16) -> bool {
        self.span() <= led_count as u32
    }
}

/// Evenly spaced bars separated by dark gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarsWithGapParams {
    pub brightness: u8,
    pub delay: u16,
    pub segment_count: u16,
    pub segment_length: u16,
    pub gap_length: u16,
}

impl BarsWithGapParams {
    pub fn new(
        brightness: u8,
        delay: u16,
        segment_count: u16,
        segment_length: u16,
        gap_length: u16,
    ) -> Self {
        Self {
            brightness,
            delay,
            segment_count,
            segment_length,
            gap_length,
        }
    }

    /// LEDs from the start of the first bar to the end of the last one.
    ///
    /// Gaps only sit between bars, so `n` bars have `n - 1` gaps. Computed in
    /// `u64` so any combination of `u16` fields fits.
    pub fn span(&self) -> u64 {
        let count = self.segment_count as u64;
        if count == 0 {
            return 0;
        }
        count * self.segment_length as u64 + (count - 1) * self.gap_length as u64
    }

    pub fn fits(&self, led_count: u16) -> bool {
        self.span() <= led_count as u64
    }

    /// Whether LED `index` (relative to the first bar) is lit.
    pub fn is_lit(&self, index: u32) -> bool {
        let index = index as u64;
        // An empty span also covers a zero period.
        if index >= self.span() {
            return false;
        }
        let period = self.segment_length as u64 + self.gap_length as u64;
        index % period < self.segment_length as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PREVIEW_LED_COUNT, TOTAL_LED_COUNT};

    #[test]
    fn bars_span_counts_gaps_between_bars_only() {
        let bars = BarsWithGapParams::new(200, 10, 4, 5, 3);
        assert_eq!(bars.span(), 4 * 5 + 3 * 3);
        assert!(bars.fits(29));
        assert!(!bars.fits(28));
    }

    #[test]
    fn zero_bars_span_nothing() {
        let bars = BarsWithGapParams::new(200, 10, 0, 5, 3);
        assert_eq!(bars.span(), 0);
        assert!(!bars.is_lit(0));
    }

    #[test]
    fn bars_alternate_lit_and_dark() {
        let bars = BarsWithGapParams::new(200, 10, 2, 2, 1);
        let lit: [bool; 6] = core::array::from_fn(|i| bars.is_lit(i as u32));
        assert_eq!(lit, [true, true, false, true, true, false]);
    }

    #[test]
    fn largest_bar_pattern_does_not_overflow() {
        let bars = BarsWithGapParams::new(1, 1, u16::MAX, u16::MAX, u16::MAX);
        let max = u16::MAX as u64;
        assert_eq!(bars.span(), max * max + (max - 1) * max);
        assert!(!bars.fits(u16::MAX));
        assert!(bars.is_lit(0));
        assert!(!bars.is_lit(u16::MAX as u32));
        assert!(bars.is_lit(u32::MAX - 1));
    }

    #[test]
    fn explosion_span_includes_travel() {
        let params = ExplosionParams::new(Rgb::RED, Rgb::BLUE, 15, 20, 160);
        assert_eq!(params.span(), 180);
        assert!(params.fits(PREVIEW_LED_COUNT));
        assert!(!ExplosionParams::new(Rgb::RED, Rgb::BLUE, 15, 21, 160).fits(PREVIEW_LED_COUNT));
    }

    #[test]
    fn ascend_fits_full_strip() {
        assert!(AscendParams::new(255, 5, TOTAL_LED_COUNT).fits(TOTAL_LED_COUNT));
        assert!(!AscendParams::new(255, 5, TOTAL_LED_COUNT + 1).fits(TOTAL_LED_COUNT));
    }
}
