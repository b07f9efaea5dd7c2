//! Integration tests for the effect model and its parameter records

mod common;
use common::*;

use firework_sim::config::{MAX_SPEED_DELAY_MS, PREVIEW_LED_COUNT, TOTAL_LED_COUNT};
use firework_sim::{
    BarsWithGapParams, EffectError, ExplodeMode, FireworkEffect, GradientMode, LaserColor,
    LaunchMode, Rgb,
};

#[test]
fn reference_effect_reads_back_exactly() {
    let effect = reference_effect();

    assert_eq!(effect.color1, Rgb::RED);
    assert_eq!(effect.color2, Rgb::BLUE);
    assert_eq!(effect.max_brightness, 200);
    assert_eq!(effect.launch_mode, LaunchMode::StepAscend);
    assert_eq!(effect.gradient_mode, GradientMode::Gradient);
    assert_eq!(effect.explode_mode, ExplodeMode::Blink);
    assert_eq!(effect.laser_color, LaserColor::Green);
    assert_eq!(effect.mirror_angle, 45);
    assert_eq!(effect.explosion_led_count, 30);
    assert_eq!(effect.speed_delay, 20);
}

#[test]
fn every_brightness_value_builds() {
    for brightness in 0..=u8::MAX {
        let effect = FireworkEffect::builder()
            .max_brightness(brightness)
            .build()
            .unwrap();
        assert_eq!(effect.max_brightness, brightness);
    }
}

#[test]
fn first_failing_field_is_reported() {
    let result = FireworkEffect::builder()
        .mirror_angle(500)
        .speed_delay(MAX_SPEED_DELAY_MS + 1)
        .build();
    assert_eq!(result, Err(EffectError::MirrorAngleOutOfRange(500)));
}

#[test]
fn gradient_color_respects_brightness_ceiling() {
    let effect = FireworkEffect::builder()
        .colors(Rgb::WHITE, Rgb::WHITE)
        .max_brightness(127)
        .build()
        .unwrap();
    assert_eq!(effect.color_at(0.5), Rgb::new(127, 127, 127));
}

#[test]
fn switch_gradient_uses_one_color_at_a_time() {
    let effect = FireworkEffect::builder()
        .colors(Rgb::RED, Rgb::GREEN)
        .gradient_mode(GradientMode::Switch)
        .build()
        .unwrap();
    assert_eq!(effect.color_at(0.0), Rgb::RED);
    assert_eq!(effect.color_at(0.99), Rgb::GREEN);
}

#[test]
fn explosion_led_count_is_bounded_by_strip() {
    assert!(FireworkEffect::builder()
        .explosion_led_count(TOTAL_LED_COUNT)
        .build()
        .is_ok());
    assert!(FireworkEffect::builder()
        .explosion_led_count(TOTAL_LED_COUNT + 1)
        .build()
        .is_err());
}

#[test]
fn bar_pattern_fits_preview_section() {
    // 10 bars of 12 with gaps of 6: 120 lit + 54 dark.
    let bars = BarsWithGapParams::new(180, 25, 10, 12, 6);
    assert_eq!(bars.span(), 174);
    assert!(bars.fits(PREVIEW_LED_COUNT));
    assert!(bars.is_lit(0));
    assert!(!bars.is_lit(12));
    assert!(bars.is_lit(18));
    assert!(!bars.is_lit(174));
}
