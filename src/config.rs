//! Board configuration: pin assignments, strip sizing and protocol constants.
//!
//! Everything the firmware wires to a fixed number lives here so the rest of
//! the crate never hard-codes a pin or a capacity.

/// An analog input channel (`A0`, `A1`, ...) on the controller board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogPin(pub u8);

// LED strip
/// Data line of the addressable LED strip.
pub const LED_PIN: u8 = 7;

/// Number of LEDs on the full strip.
pub const TOTAL_LED_COUNT: u16 = 280;

/// Number of LEDs lit while previewing an effect.
///
/// Must stay within [`TOTAL_LED_COUNT`].
pub const PREVIEW_LED_COUNT: u16 = 180;

// Servo
/// PWM line of the laser mirror servo.
pub const SERVO_PIN: u8 = 9;

/// Largest mirror angle the servo can reach, in degrees.
pub const MAX_MIRROR_ANGLE: u16 = 180;

// Buttons (active low, idle HIGH)
pub const ASCEND_BUTTON_PIN: u8 = 2;
pub const LASER_BUTTON_PIN: u8 = 3;
pub const PREVIEW_BUTTON_PIN: u8 = 5;
pub const SAVE_BUTTON_PIN: u8 = 8;
pub const CUSTOMIZE_BUTTON_PIN: u8 = 10;

// Sliders
pub const BRIGHTNESS_SLIDER_PIN: AnalogPin = AnalogPin(12);
pub const MIRROR_SLIDER_PIN: AnalogPin = AnalogPin(13);
pub const SIZE_SLIDER_PIN: AnalogPin = AnalogPin(14);
pub const SPEED_SLIDER_PIN: AnalogPin = AnalogPin(15);

// Joysticks
pub const JOYSTICK1_X_PIN: AnalogPin = AnalogPin(0);
pub const JOYSTICK1_Y_PIN: AnalogPin = AnalogPin(1);
pub const JOYSTICK2_X_PIN: AnalogPin = AnalogPin(2);
pub const JOYSTICK2_Y_PIN: AnalogPin = AnalogPin(3);

/// Highest value returned by the 10-bit ADC.
pub const ADC_MAX: u16 = 1023;

// Effect limits
/// Slowest accepted inter-frame delay, in milliseconds.
pub const MAX_SPEED_DELAY_MS: u16 = 1000;

/// Capacity of the saved-effect store on the device.
pub const MAX_SAVED_EFFECTS: usize = 10;

// Serial link
pub const SERIAL_BAUD_RATE: u32 = 115_200;

pub const MSG_SAVE_EFFECT: u8 = b'S';
pub const MSG_PLAY_EFFECT: u8 = b'P';
pub const MSG_PREVIEW: u8 = b'V';
pub const MSG_TEST_DATA: u8 = b'T';

/// Longest line accepted or produced on the serial link, line terminator excluded.
pub const MAX_LINE_LENGTH: usize = 96;

/// Most values carried by one test-data line.
pub const MAX_TEST_VALUES: usize = 8;

/// Longest `type`/`name`/value token of a test-data line.
pub const MAX_TOKEN_LENGTH: usize = 16;

/// Pause between two effects of a firework river, in milliseconds.
pub const PLAYBACK_INTERVAL_MS: u64 = 3000;

const _: () = assert!(PREVIEW_LED_COUNT <= TOTAL_LED_COUNT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_bytes_are_distinct() {
        let bytes = [MSG_SAVE_EFFECT, MSG_PLAY_EFFECT, MSG_PREVIEW, MSG_TEST_DATA];
        for (i, a) in bytes.iter().enumerate() {
            for b in &bytes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
