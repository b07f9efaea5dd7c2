//! Conversion of raw slider and joystick readings into effect fields.
//!
//! Readings come from the 10-bit ADC (`0..=ADC_MAX`). Debouncing and
//! sampling belong to the board support code; these functions only scale.

use libm::{atan2f, sqrtf};

use crate::color::{self, Rgb};
use crate::config::{ADC_MAX, MAX_MIRROR_ANGLE, MAX_SPEED_DELAY_MS, TOTAL_LED_COUNT};
use crate::effect::FireworkEffect;

/// Re-maps `value` from `in_min..=in_max` to `out_min..=out_max`.
///
/// Integer arithmetic truncating toward zero, like the Arduino `map()`, but
/// the result is clamped to the output range. A degenerate input range maps
/// everything to `out_min`.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_min == in_max {
        return out_min;
    }
    // Products of two i32 differences need 66 bits.
    let mapped = (value as i128 - in_min as i128) * (out_max as i128 - out_min as i128)
        / (in_max as i128 - in_min as i128)
        + out_min as i128;
    let (low, high) = if out_min <= out_max {
        (out_min, out_max)
    } else {
        (out_max, out_min)
    };
    mapped.clamp(low as i128, high as i128) as i32
}

fn from_adc(reading: u16, out_min: u16, out_max: u16) -> u16 {
    map_range(
        reading.min(ADC_MAX) as i32,
        0,
        ADC_MAX as i32,
        out_min as i32,
        out_max as i32,
    ) as u16
}

/// Brightness slider to `max_brightness`.
pub fn brightness_from_slider(reading: u16) -> u8 {
    from_adc(reading, 0, u8::MAX as u16) as u8
}

/// Mirror slider to `mirror_angle` in degrees.
pub fn mirror_angle_from_slider(reading: u16) -> u16 {
    from_adc(reading, 0, MAX_MIRROR_ANGLE)
}

/// Size slider to `explosion_led_count`. Never zero.
pub fn explosion_count_from_slider(reading: u16) -> u16 {
    from_adc(reading, 1, TOTAL_LED_COUNT)
}

/// Speed slider to `speed_delay`. Pushing the slider up makes the effect
/// faster, so the delay shrinks as the reading grows.
pub fn speed_delay_from_slider(reading: u16) -> u16 {
    from_adc(reading, MAX_SPEED_DELAY_MS, 0)
}

/// Joystick readings below this deflection from center count as centered.
pub const JOYSTICK_DEAD_ZONE: f32 = 0.08;

/// Picks a color from a joystick position.
///
/// The direction of deflection selects the hue, the amount of deflection the
/// value. A centered stick returns `None` so the edited color is kept.
pub fn color_from_joystick(x: u16, y: u16) -> Option<Rgb> {
    let center = ADC_MAX as f32 / 2.0;
    let dx = (x.min(ADC_MAX) as f32 - center) / center;
    let dy = (y.min(ADC_MAX) as f32 - center) / center;

    let magnitude = sqrtf(dx * dx + dy * dy).min(1.0);
    if magnitude < JOYSTICK_DEAD_ZONE {
        return None;
    }

    let hue = atan2f(dy, dx).to_degrees();
    Some(color::hsv(hue, 1.0, magnitude))
}

/// One sample of every front-panel analog control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlReadings {
    pub brightness: u16,
    pub mirror: u16,
    pub size: u16,
    pub speed: u16,
    /// Picks `color1`.
    pub joystick1: (u16, u16),
    /// Picks `color2`.
    pub joystick2: (u16, u16),
}

impl ControlReadings {
    /// Writes the sampled controls into `effect`.
    ///
    /// Colors only change while their joystick is deflected.
    pub fn apply_to(&self, effect: &mut FireworkEffect) {
        effect.max_brightness = brightness_from_slider(self.brightness);
        effect.mirror_angle = mirror_angle_from_slider(self.mirror);
        effect.explosion_led_count = explosion_count_from_slider(self.size);
        effect.speed_delay = speed_delay_from_slider(self.speed);

        if let Some(color) = color_from_joystick(self.joystick1.0, self.joystick1.1) {
            effect.color1 = color;
        }
        if let Some(color) = color_from_joystick(self.joystick2.0, self.joystick2.1) {
            effect.color2 = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_matches_arduino_map() {
        assert_eq!(map_range(512, 0, 1023, 0, 255), 127);
        assert_eq!(map_range(0, 0, 1023, 0, 255), 0);
        assert_eq!(map_range(1023, 0, 1023, 0, 255), 255);
    }

    #[test]
    fn map_range_clamps_and_inverts() {
        assert_eq!(map_range(2000, 0, 1023, 0, 255), 255);
        assert_eq!(map_range(-5, 0, 1023, 0, 255), 0);
        assert_eq!(map_range(0, 0, 1023, 100, 0), 100);
        assert_eq!(map_range(1023, 0, 1023, 100, 0), 0);
        assert_eq!(map_range(3, 5, 5, 7, 9), 7);
    }

    #[test]
    fn map_range_clamps_extreme_inputs() {
        assert_eq!(map_range(i32::MAX, 0, 1, 0, i32::MAX), i32::MAX);
        assert_eq!(map_range(i32::MIN, 0, 1, 0, i32::MAX), 0);
        assert_eq!(map_range(i32::MAX, i32::MIN, i32::MAX, i32::MIN, i32::MAX), i32::MAX);
        assert_eq!(map_range(i32::MIN, i32::MIN, i32::MAX, i32::MAX, i32::MIN), i32::MAX);
        assert_eq!(map_range(0, -1, 1, -1000, 1000), 0);
    }

    #[test]
    fn sliders_cover_their_field_ranges() {
        assert_eq!(brightness_from_slider(0), 0);
        assert_eq!(brightness_from_slider(ADC_MAX), 255);
        assert_eq!(brightness_from_slider(u16::MAX), 255);

        assert_eq!(mirror_angle_from_slider(ADC_MAX), MAX_MIRROR_ANGLE);

        assert_eq!(explosion_count_from_slider(0), 1);
        assert_eq!(explosion_count_from_slider(ADC_MAX), TOTAL_LED_COUNT);

        assert_eq!(speed_delay_from_slider(0), MAX_SPEED_DELAY_MS);
        assert_eq!(speed_delay_from_slider(ADC_MAX), 0);
    }

    #[test]
    fn slider_values_always_build_a_valid_effect() {
        for reading in (0..=ADC_MAX).step_by(31) {
            let effect = FireworkEffect::builder()
                .max_brightness(brightness_from_slider(reading))
                .mirror_angle(mirror_angle_from_slider(reading))
                .explosion_led_count(explosion_count_from_slider(reading))
                .speed_delay(speed_delay_from_slider(reading))
                .build();
            assert!(effect.is_ok());
        }
    }

    #[test]
    fn centered_joystick_keeps_color() {
        assert_eq!(color_from_joystick(512, 512), None);
        assert_eq!(color_from_joystick(511, 512), None);
    }

    #[test]
    fn full_right_deflection_is_red() {
        assert_eq!(color_from_joystick(ADC_MAX, 511), Some(Rgb::RED));
    }

    #[test]
    fn readings_update_effect_and_keep_centered_colors() {
        let mut effect = FireworkEffect::default();
        let readings = ControlReadings {
            brightness: ADC_MAX,
            mirror: 0,
            size: ADC_MAX,
            speed: ADC_MAX,
            joystick1: (ADC_MAX, 511),
            joystick2: (512, 512),
        };
        readings.apply_to(&mut effect);

        assert_eq!(effect.max_brightness, 255);
        assert_eq!(effect.mirror_angle, 0);
        assert_eq!(effect.explosion_led_count, TOTAL_LED_COUNT);
        assert_eq!(effect.speed_delay, 0);
        assert_eq!(effect.color1, Rgb::RED);
        assert_eq!(effect.color2, FireworkEffect::default().color2);
    }
}
