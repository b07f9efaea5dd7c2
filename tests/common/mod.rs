//! Shared test infrastructure for firework-sim integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use firework_sim::{EffectSink, FireworkEffect, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    /// Current mock time in milliseconds
    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// Sink that records every effect it is asked to play
pub struct RecordingSink {
    played: heapless::Vec<FireworkEffect, 16>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            played: heapless::Vec::new(),
        }
    }

    pub fn played(&self) -> &[FireworkEffect] {
        &self.played
    }
}

impl EffectSink for RecordingSink {
    fn play(&mut self, effect: &FireworkEffect) {
        let _ = self.played.push(*effect);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// The reference effect: red to blue, step launch, blinking green-laser burst
pub fn reference_effect() -> FireworkEffect {
    use firework_sim::{ExplodeMode, LaserColor, LaunchMode, Rgb};

    FireworkEffect::builder()
        .colors(Rgb::RED, Rgb::BLUE)
        .max_brightness(200)
        .launch_mode(LaunchMode::StepAscend)
        .explode_mode(ExplodeMode::Blink)
        .laser_color(LaserColor::Green)
        .mirror_angle(45)
        .explosion_led_count(30)
        .speed_delay(20)
        .build()
        .unwrap()
}

/// An effect tagged by its speed delay
pub fn effect_with_delay(delay: u16) -> FireworkEffect {
    FireworkEffect::builder().speed_delay(delay).build().unwrap()
}
