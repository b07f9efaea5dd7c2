use crate::color::Rgb;
use crate::config::{MAX_MIRROR_ANGLE, MAX_SPEED_DELAY_MS, TOTAL_LED_COUNT};
use crate::types::{ExplodeMode, GradientMode, LaserColor, LaunchMode};

/// Errors raised when an effect field is outside what the hardware can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectError {
    /// Mirror angle beyond the servo's travel.
    MirrorAngleOutOfRange(u16),

    /// Explosion LED count is zero or larger than the strip.
    ExplosionLedCountOutOfRange(u16),

    /// Inter-frame delay slower than the firmware accepts.
    SpeedDelayOutOfRange(u16),
}

impl core::fmt::Display for EffectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EffectError::MirrorAngleOutOfRange(angle) => {
                write!(f, "mirror angle {} exceeds {}", angle, MAX_MIRROR_ANGLE)
            }
            EffectError::ExplosionLedCountOutOfRange(count) => {
                write!(
                    f,
                    "explosion LED count {} must be between 1 and {}",
                    count, TOTAL_LED_COUNT
                )
            }
            EffectError::SpeedDelayOutOfRange(delay) => {
                write!(f, "speed delay {}ms exceeds {}ms", delay, MAX_SPEED_DELAY_MS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EffectError {}

/// One firework's visual configuration.
///
/// Plain data: the effect is copied between the editor, the saved-effect
/// store and the serial link, and never borrowed across them. Construct
/// validated values with [`FireworkEffect::builder`]; the fields are public
/// so the renderer can read them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireworkEffect {
    /// Gradient start color.
    pub color1: Rgb,

    /// Gradient end color.
    pub color2: Rgb,

    /// Brightness ceiling applied to every LED.
    pub max_brightness: u8,

    pub launch_mode: LaunchMode,
    pub gradient_mode: GradientMode,
    pub explode_mode: ExplodeMode,
    pub laser_color: LaserColor,

    /// Mirror servo angle in degrees.
    pub mirror_angle: u16,

    /// Number of LEDs lit by the burst.
    pub explosion_led_count: u16,

    /// Delay between animation frames in milliseconds. Smaller is faster.
    pub speed_delay: u16,
}

impl FireworkEffect {
    /// Creates a builder seeded with [`FireworkEffect::default`].
    pub fn builder() -> EffectBuilder {
        EffectBuilder::new()
    }

    /// Checks the fields the type system cannot bound on its own.
    ///
    /// # Errors
    /// * `MirrorAngleOutOfRange` - angle above the servo's travel
    /// * `ExplosionLedCountOutOfRange` - zero LEDs or more than the strip holds
    /// * `SpeedDelayOutOfRange` - delay above the slowest accepted speed
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.mirror_angle > MAX_MIRROR_ANGLE {
            return Err(EffectError::MirrorAngleOutOfRange(self.mirror_angle));
        }

        if self.explosion_led_count == 0 || self.explosion_led_count > TOTAL_LED_COUNT {
            return Err(EffectError::ExplosionLedCountOutOfRange(
                self.explosion_led_count,
            ));
        }

        if self.speed_delay > MAX_SPEED_DELAY_MS {
            return Err(EffectError::SpeedDelayOutOfRange(self.speed_delay));
        }

        Ok(())
    }

    /// Color of the effect at `progress` through its gradient, with the
    /// brightness ceiling applied.
    pub fn color_at(&self, progress: f32) -> Rgb {
        self.gradient_mode
            .color_at(self.color1, self.color2, progress)
            .scale(self.max_brightness)
    }
}

impl Default for FireworkEffect {
    fn default() -> Self {
        Self {
            color1: Rgb::RED,
            color2: Rgb::YELLOW,
            max_brightness: 255,
            launch_mode: LaunchMode::NormalAscend,
            gradient_mode: GradientMode::Gradient,
            explode_mode: ExplodeMode::Normal,
            laser_color: LaserColor::None,
            mirror_angle: 90,
            explosion_led_count: 30,
            speed_delay: 20,
        }
    }
}

/// Builder for validated firework effects.
#[derive(Debug, Clone, Copy)]
pub struct EffectBuilder {
    effect: FireworkEffect,
}

impl EffectBuilder {
    pub fn new() -> Self {
        Self {
            effect: FireworkEffect::default(),
        }
    }

    /// Sets both gradient endpoints.
    pub fn colors(mut self, color1: Rgb, color2: Rgb) -> Self {
        self.effect.color1 = color1;
        self.effect.color2 = color2;
        self
    }

    pub fn max_brightness(mut self, brightness: u8) -> Self {
        self.effect.max_brightness = brightness;
        self
    }

    pub fn launch_mode(mut self, mode: LaunchMode) -> Self {
        self.effect.launch_mode = mode;
        self
    }

    pub fn gradient_mode(mut self, mode: GradientMode) -> Self {
        self.effect.gradient_mode = mode;
        self
    }

    pub fn explode_mode(mut self, mode: ExplodeMode) -> Self {
        self.effect.explode_mode = mode;
        self
    }

    pub fn laser_color(mut self, color: LaserColor) -> Self {
        self.effect.laser_color = color;
        self
    }

    pub fn mirror_angle(mut self, angle: u16) -> Self {
        self.effect.mirror_angle = angle;
        self
    }

    pub fn explosion_led_count(mut self, count: u16) -> Self {
        self.effect.explosion_led_count = count;
        self
    }

    pub fn speed_delay(mut self, delay: u16) -> Self {
        self.effect.speed_delay = delay;
        self
    }

    /// Builds and validates the effect.
    ///
    /// # Errors
    /// See [`FireworkEffect::validate`].
    pub fn build(self) -> Result<FireworkEffect, EffectError> {
        self.effect.validate()?;
        Ok(self.effect)
    }
}

impl Default for EffectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_effect_is_valid() {
        assert_eq!(FireworkEffect::default().validate(), Ok(()));
        assert_eq!(EffectBuilder::default().build(), Ok(FireworkEffect::default()));
    }

    #[test]
    fn builder_rejects_out_of_range_fields() {
        assert_eq!(
            FireworkEffect::builder().mirror_angle(181).build(),
            Err(EffectError::MirrorAngleOutOfRange(181))
        );
        assert_eq!(
            FireworkEffect::builder().explosion_led_count(0).build(),
            Err(EffectError::ExplosionLedCountOutOfRange(0))
        );
        assert_eq!(
            FireworkEffect::builder()
                .explosion_led_count(TOTAL_LED_COUNT + 1)
                .build(),
            Err(EffectError::ExplosionLedCountOutOfRange(TOTAL_LED_COUNT + 1))
        );
        assert_eq!(
            FireworkEffect::builder().speed_delay(MAX_SPEED_DELAY_MS + 1).build(),
            Err(EffectError::SpeedDelayOutOfRange(MAX_SPEED_DELAY_MS + 1))
        );
    }

    #[test]
    fn builder_accepts_range_limits() {
        let effect = FireworkEffect::builder()
            .mirror_angle(MAX_MIRROR_ANGLE)
            .explosion_led_count(TOTAL_LED_COUNT)
            .speed_delay(0)
            .build()
            .unwrap();
        assert_eq!(effect.mirror_angle, MAX_MIRROR_ANGLE);
        assert_eq!(effect.explosion_led_count, TOTAL_LED_COUNT);
        assert_eq!(effect.speed_delay, 0);
    }

    #[test]
    fn color_at_applies_brightness_ceiling() {
        let effect = FireworkEffect::builder()
            .colors(Rgb::WHITE, Rgb::WHITE)
            .max_brightness(0)
            .build()
            .unwrap();
        assert_eq!(effect.color_at(0.3), Rgb::BLACK);
    }
}
