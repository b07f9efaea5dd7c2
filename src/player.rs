//! Back-to-back playback of saved effects ("firework river").
//!
//! Provides [`EffectPlayer`], which hands a queue of effects to an
//! [`EffectSink`] one at a time with a fixed pause between them, and the
//! [`EffectSink`] trait for whatever actually shows the effect (the LED
//! renderer on the board, or the serial link on the host).

use crate::config::PLAYBACK_INTERVAL_MS;
use crate::effect::FireworkEffect;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use heapless::Vec;

/// Trait for anything that can show a firework effect.
pub trait EffectSink {
    /// Starts showing `effect`. Handle hardware errors internally; this
    /// method cannot fail.
    fn play(&mut self, effect: &FireworkEffect);
}

/// The current state of an effect player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerState {
    /// No queue loaded.
    Idle,
    /// Queue loaded, nothing played yet.
    Loaded,
    /// Handing effects to the sink.
    Running,
    /// Playback held; the pause does not count toward the interval.
    Paused,
    /// Every queued effect has been played.
    Complete,
}

/// When the player needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Next effect is due after this delay.
    Delay(D),

    /// Queue exhausted. No further servicing needed.
    Complete,
}

/// Errors that can occur during player operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of expected state(s)
        expected: &'static str,
        /// The actual current state
        actual: PlayerState,
    },

    /// Loaded queue has no effects.
    EmptyQueue,

    /// Loaded queue holds more effects than the player's capacity.
    QueueTooLong { len: usize, capacity: usize },
}

impl core::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlayerError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but player is in {:?}",
                    expected, actual
                )
            }
            PlayerError::EmptyQueue => write!(f, "no effects to play"),
            PlayerError::QueueTooLong { len, capacity } => {
                write!(f, "queue of {} effects exceeds capacity {}", len, capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayerError {}

/// Plays a queue of effects in order, one every `interval`.
///
/// The first effect plays as soon as the player starts; each later one plays
/// once `interval` has passed since the previous one. Call
/// [`service`](Self::service) at least as often as the returned delay asks.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Sink the effects are played on
/// * `T` - Time source implementation type
/// * `MAX` - Maximum number of queued effects
pub struct EffectPlayer<'t, I: TimeInstant, S: EffectSink, T: TimeSource<I>, const MAX: usize> {
    sink: S,
    time_source: &'t T,
    interval: I::Duration,
    state: PlayerState,
    queue: Vec<FireworkEffect, MAX>,
    next_index: usize,
    last_played: Option<I>,
    pause_start_time: Option<I>,
}

impl<'t, I: TimeInstant, S: EffectSink, T: TimeSource<I>, const MAX: usize>
    EffectPlayer<'t, I, S, T, MAX>
{
    /// Creates an idle player.
    pub fn new(sink: S, time_source: &'t T, interval: I::Duration) -> Self {
        Self {
            sink,
            time_source,
            interval,
            state: PlayerState::Idle,
            queue: Vec::new(),
            next_index: 0,
            last_played: None,
            pause_start_time: None,
        }
    }

    /// Creates an idle player pausing [`PLAYBACK_INTERVAL_MS`] between effects.
    pub fn with_default_interval(sink: S, time_source: &'t T) -> Self {
        Self::new(sink, time_source, I::Duration::from_millis(PLAYBACK_INTERVAL_MS))
    }

    /// Loads a queue of effects. Can be called from any state.
    ///
    /// Stops any running playback and transitions to `Loaded`.
    ///
    /// # Errors
    /// * `EmptyQueue` - `effects` is empty
    /// * `QueueTooLong` - `effects` holds more than `MAX` entries
    pub fn load(&mut self, effects: &[FireworkEffect]) -> Result<(), PlayerError> {
        if effects.is_empty() {
            return Err(PlayerError::EmptyQueue);
        }

        self.queue = Vec::from_slice(effects).map_err(|_| PlayerError::QueueTooLong {
            len: effects.len(),
            capacity: MAX,
        })?;
        self.rewind();
        self.state = PlayerState::Loaded;
        Ok(())
    }

    /// Starts playback from the first effect.
    ///
    /// Must be called from `Loaded` state.
    pub fn start(&mut self) -> Result<ServiceTiming<I::Duration>, PlayerError> {
        if self.state != PlayerState::Loaded {
            return Err(PlayerError::InvalidState {
                expected: "Loaded",
                actual: self.state,
            });
        }

        #[cfg(feature = "defmt")]
        defmt::info!("starting firework river of {} effects", self.queue.len());

        self.state = PlayerState::Running;
        self.service()
    }

    /// Plays the next effect if it is due.
    ///
    /// Must be called from `Running` state.
    ///
    /// # Returns
    /// - `Ok(ServiceTiming::Delay(duration))` - service again after this delay
    /// - `Ok(ServiceTiming::Complete)` - last effect played, transitions to `Complete`
    /// - `Err` - Invalid state
    pub fn service(&mut self) -> Result<ServiceTiming<I::Duration>, PlayerError> {
        if self.state != PlayerState::Running {
            return Err(PlayerError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        let now = self.time_source.now();

        if let Some(last) = self.last_played {
            let elapsed = now.duration_since(last);
            if elapsed.as_millis() < self.interval.as_millis() {
                return Ok(ServiceTiming::Delay(self.interval.saturating_sub(elapsed)));
            }
        }

        // Next entry always exists while running.
        let Some(effect) = self.queue.get(self.next_index) else {
            self.state = PlayerState::Complete;
            return Ok(ServiceTiming::Complete);
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("playing effect {} of {}", self.next_index + 1, self.queue.len());

        self.sink.play(effect);
        self.next_index += 1;
        self.last_played = Some(now);

        if self.next_index == self.queue.len() {
            #[cfg(feature = "defmt")]
            defmt::info!("firework river complete");

            self.state = PlayerState::Complete;
            return Ok(ServiceTiming::Complete);
        }

        Ok(ServiceTiming::Delay(self.interval))
    }

    /// Holds playback.
    ///
    /// Must be called from `Running` state.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.state != PlayerState::Running {
            return Err(PlayerError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        self.pause_start_time = Some(self.time_source.now());
        self.state = PlayerState::Paused;
        Ok(())
    }

    /// Resumes held playback, excluding the paused time from the interval.
    ///
    /// Must be called from `Paused` state.
    pub fn resume(&mut self) -> Result<ServiceTiming<I::Duration>, PlayerError> {
        if self.state != PlayerState::Paused {
            return Err(PlayerError::InvalidState {
                expected: "Paused",
                actual: self.state,
            });
        }

        if let (Some(pause_start), Some(last)) = (self.pause_start_time, self.last_played) {
            let paused_for = self.time_source.now().duration_since(pause_start);
            // On timer overflow keep the old instant; the next effect just plays early.
            self.last_played = Some(last.checked_add(paused_for).unwrap_or(last));
        }

        self.pause_start_time = None;
        self.state = PlayerState::Running;
        self.service()
    }

    /// Stops playback and rewinds to the first effect.
    ///
    /// The queue stays loaded. Can be called from `Running`, `Paused`, or `Complete`.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlayerState::Running | PlayerState::Paused | PlayerState::Complete => {
                self.rewind();
                self.state = PlayerState::Loaded;
                Ok(())
            }
            _ => Err(PlayerError::InvalidState {
                expected: "Running, Paused, or Complete",
                actual: self.state,
            }),
        }
    }

    /// Drops the queue. Can be called from any state.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.rewind();
        self.state = PlayerState::Idle;
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Number of effects already handed to the sink.
    pub fn played(&self) -> usize {
        self.next_index
    }

    /// Number of effects still to play.
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.next_index
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn rewind(&mut self) {
        self.next_index = 0;
        self.last_played = None;
        self.pause_start_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TestDuration(u64);

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

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TestInstant(u64);

    impl TimeInstant for TestInstant {
        type Duration = TestDuration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            TestDuration(self.0 - earlier.0)
        }

        fn checked_add(self, duration: Self::Duration) -> Option<Self> {
            self.0.checked_add(duration.0).map(TestInstant)
        }
    }

    struct MockTimeSource {
        current_time: core::cell::Cell<TestInstant>,
    }

    impl MockTimeSource {
        fn new() -> Self {
            Self {
                current_time: core::cell::Cell::new(TestInstant(0)),
            }
        }

        fn advance(&self, millis: u64) {
            let current = self.current_time.get();
            self.current_time.set(TestInstant(current.0 + millis));
        }
    }

    impl TimeSource<TestInstant> for MockTimeSource {
        fn now(&self) -> TestInstant {
            self.current_time.get()
        }
    }

    // Records the speed delay of each played effect as a tag.
    struct MockSink {
        played: Vec<u16, 8>,
    }

    impl EffectSink for MockSink {
        fn play(&mut self, effect: &FireworkEffect) {
            let _ = self.played.push(effect.speed_delay);
        }
    }

    type Player<'t> = EffectPlayer<'t, TestInstant, MockSink, MockTimeSource, 4>;

    fn queue(delays: &[u16]) -> Vec<FireworkEffect, 4> {
        delays
            .iter()
            .map(|&d| FireworkEffect::builder().speed_delay(d).build().unwrap())
            .collect()
    }

    fn player(timer: &MockTimeSource) -> Player<'_> {
        EffectPlayer::new(MockSink { played: Vec::new() }, timer, TestDuration(3000))
    }

    #[test]
    fn start_requires_loaded_state() {
        let timer = MockTimeSource::new();
        let mut player = player(&timer);
        assert!(matches!(
            player.start(),
            Err(PlayerError::InvalidState { expected: "Loaded", .. })
        ));
    }

    #[test]
    fn load_rejects_empty_and_oversized_queues() {
        let timer = MockTimeSource::new();
        let mut player = player(&timer);
        assert_eq!(player.load(&[]), Err(PlayerError::EmptyQueue));

        let effects = [FireworkEffect::default(); 5];
        assert_eq!(
            player.load(&effects),
            Err(PlayerError::QueueTooLong { len: 5, capacity: 4 })
        );
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn plays_in_order_at_the_interval() {
        let timer = MockTimeSource::new();
        let mut player = player(&timer);
        player.load(&queue(&[1, 2, 3])).unwrap();

        assert_eq!(player.start(), Ok(ServiceTiming::Delay(TestDuration(3000))));
        assert_eq!(player.sink().played.as_slice(), &[1]);

        timer.advance(1000);
        assert_eq!(player.service(), Ok(ServiceTiming::Delay(TestDuration(2000))));
        assert_eq!(player.played(), 1);

        timer.advance(2000);
        assert_eq!(player.service(), Ok(ServiceTiming::Delay(TestDuration(3000))));
        assert_eq!(player.sink().played.as_slice(), &[1, 2]);

        timer.advance(3500);
        assert_eq!(player.service(), Ok(ServiceTiming::Complete));
        assert_eq!(player.sink().played.as_slice(), &[1, 2, 3]);
        assert_eq!(player.state(), PlayerState::Complete);
        assert_eq!(player.remaining(), 0);
    }

    #[test]
    fn single_effect_completes_immediately() {
        let timer = MockTimeSource::new();
        let mut player = player(&timer);
        player.load(&queue(&[9])).unwrap();
        assert_eq!(player.start(), Ok(ServiceTiming::Complete));
        assert!(player.service().is_err());
    }

    #[test]
    fn pause_does_not_count_toward_interval() {
        let timer = MockTimeSource::new();
        let mut player = player(&timer);
        player.load(&queue(&[1, 2])).unwrap();
        player.start().unwrap();

        timer.advance(1000);
        player.pause().unwrap();
        timer.advance(10_000);

        assert_eq!(player.resume(), Ok(ServiceTiming::Delay(TestDuration(2000))));
        assert_eq!(player.sink().played.as_slice(), &[1]);
    }

    #[test]
    fn stop_rewinds_to_first_effect() {
        let timer = MockTimeSource::new();
        let mut player = player(&timer);
        player.load(&queue(&[1, 2])).unwrap();
        player.start().unwrap();
        player.stop().unwrap();
        assert_eq!(player.state(), PlayerState::Loaded);
        assert_eq!(player.remaining(), 2);

        player.start().unwrap();
        assert_eq!(player.sink().played.as_slice(), &[1, 1]);
    }

    #[test]
    fn clear_returns_to_idle() {
        let timer = MockTimeSource::new();
        let mut player = player(&timer);
        player.load(&queue(&[1])).unwrap();
        player.clear();
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.remaining(), 0);
        assert!(player.stop().is_err());
    }
}
