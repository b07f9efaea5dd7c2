//! The device's mutable state, owned in one place.
//!
//! [`AppContext`] holds the operating mode, the effect store and the laser
//! button counter. The main loop owns one instance and passes it to whatever
//! needs it.

use crate::command::ControlAction;
use crate::effect::FireworkEffect;
use crate::input::ControlReadings;
use crate::player::{EffectPlayer, EffectSink, PlayerError, ServiceTiming};
use crate::protocol::Message;
use crate::state::{SystemState, TransitionError};
use crate::store::{EffectStore, StoreError};
use crate::time::{TimeInstant, TimeSource};
use crate::types::LaserColor;

/// Errors that can occur while applying actions or messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContextError {
    /// The action is not valid in the current mode. Nothing changed.
    Transition(TransitionError),

    /// The store rejected the operation. The mode change, if any, still happened.
    Store(StoreError),

    /// Playback requested with no saved effects. Nothing changed.
    NothingSaved,

    /// The player rejected the saved effects.
    Player(PlayerError),
}

impl core::fmt::Display for ContextError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ContextError::Transition(err) => write!(f, "{}", err),
            ContextError::Store(err) => write!(f, "{}", err),
            ContextError::NothingSaved => write!(f, "no saved effects to play"),
            ContextError::Player(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContextError {}

impl From<TransitionError> for ContextError {
    fn from(err: TransitionError) -> Self {
        ContextError::Transition(err)
    }
}

impl From<PlayerError> for ContextError {
    fn from(err: PlayerError) -> Self {
        ContextError::Player(err)
    }
}

impl From<StoreError> for ContextError {
    fn from(err: StoreError) -> Self {
        ContextError::Store(err)
    }
}

/// Mode, effects and counters of one device.
///
/// # Type Parameters
/// * `MAX` - Maximum number of saved effects
#[derive(Debug, Clone)]
pub struct AppContext<const MAX: usize> {
    state: SystemState,
    store: EffectStore<MAX>,
    laser_press_count: u32,
}

impl<const MAX: usize> AppContext<MAX> {
    /// Creates an idle context editing the default effect.
    pub fn new() -> Self {
        Self::with_store(EffectStore::new())
    }

    pub fn with_store(store: EffectStore<MAX>) -> Self {
        Self {
            state: SystemState::Idle,
            store,
            laser_press_count: 0,
        }
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn store(&self) -> &EffectStore<MAX> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EffectStore<MAX> {
        &mut self.store
    }

    pub fn current_effect(&self) -> &FireworkEffect {
        self.store.current()
    }

    /// Number of laser button presses since start-up.
    pub fn laser_press_count(&self) -> u32 {
        self.laser_press_count
    }

    /// Applies a user action and returns the resulting mode.
    ///
    /// Entering `Save` stores the current effect. A full store is reported as
    /// `Store(Full)` but the device still moves to `Save`, so the user can
    /// leave it with `Finished` or `Cancel` as usual.
    ///
    /// # Errors
    /// * `Transition` - action not valid in the current mode
    /// * `NothingSaved` - `Play` from `Idle` with an empty store
    /// * `Store` - the effect could not be saved
    pub fn handle_action(&mut self, action: ControlAction) -> Result<SystemState, ContextError> {
        if action == ControlAction::Play
            && self.state == SystemState::Idle
            && self.store.is_empty()
        {
            return Err(ContextError::NothingSaved);
        }

        let next = self.state.transition(action)?;
        self.enter(next);

        if next == SystemState::Save {
            self.save(*self.store.current())?;
        }

        Ok(next)
    }

    /// Applies a decoded serial message and returns the resulting mode.
    ///
    /// * `P` makes the carried effect current and plays it.
    /// * `V` makes the carried effect current and previews it; only valid
    ///   while customizing or previewing.
    /// * `S` appends the carried effect to the store without a mode change.
    /// * `T` is ignored.
    /// * A mode announcement adopts the announced mode as-is, so a host can
    ///   mirror the board.
    pub fn handle_message(&mut self, message: &Message) -> Result<SystemState, ContextError> {
        match message {
            Message::PlayEffect(effect) => {
                if self.state != SystemState::PlaySaved {
                    let next = self.state.transition(ControlAction::Play)?;
                    self.enter(next);
                }
                self.store.set_current(*effect);
            }
            Message::Preview(effect) => {
                if self.state != SystemState::Preview {
                    let next = self.state.transition(ControlAction::Preview)?;
                    self.enter(next);
                }
                self.store.set_current(*effect);
            }
            Message::SaveEffect(effect) => {
                self.save(*effect)?;
            }
            Message::TestData(_) => {}
            Message::Mode(state) => self.enter(*state),
        }

        Ok(self.state)
    }

    /// Applies a message received from the board, as the host does.
    ///
    /// An `IDLE MODE` announcement while effects are saved starts the
    /// firework river on `player`; the returned timing then says when to
    /// service it next. Every other message behaves as in
    /// [`AppContext::handle_message`] and returns `None`.
    pub fn handle_board_message<I, S, T, const QUEUE: usize>(
        &mut self,
        message: &Message,
        player: &mut EffectPlayer<'_, I, S, T, QUEUE>,
    ) -> Result<Option<ServiceTiming<I::Duration>>, ContextError>
    where
        I: TimeInstant,
        S: EffectSink,
        T: TimeSource<I>,
    {
        self.handle_message(message)?;

        match message {
            Message::Mode(SystemState::Idle) if !self.store.is_empty() => {
                self.start_river(player).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Loads every saved effect into `player`, in save order, and starts it.
    ///
    /// # Errors
    /// * `NothingSaved` - the store is empty
    /// * `Player` - the player cannot queue that many effects
    pub fn start_river<I, S, T, const QUEUE: usize>(
        &self,
        player: &mut EffectPlayer<'_, I, S, T, QUEUE>,
    ) -> Result<ServiceTiming<I::Duration>, ContextError>
    where
        I: TimeInstant,
        S: EffectSink,
        T: TimeSource<I>,
    {
        if self.store.is_empty() {
            return Err(ContextError::NothingSaved);
        }

        player.load(self.store.as_slice())?;
        Ok(player.start()?)
    }

    /// Cycles the laser color of the current effect and counts the press.
    pub fn press_laser(&mut self) -> LaserColor {
        self.laser_press_count = self.laser_press_count.wrapping_add(1);
        let effect = self.store.current_mut();
        effect.laser_color = effect.laser_color.next();
        effect.laser_color
    }

    /// Applies sampled front-panel controls to the current effect.
    ///
    /// Controls only edit the effect while customizing; returns whether the
    /// readings were applied.
    pub fn apply_readings(&mut self, readings: &ControlReadings) -> bool {
        if self.state != SystemState::Customize {
            return false;
        }
        readings.apply_to(self.store.current_mut());
        true
    }

    fn save(&mut self, effect: FireworkEffect) -> Result<usize, StoreError> {
        match self.store.save(effect) {
            Ok(index) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("effect saved in slot {}", index);
                Ok(index)
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("save rejected: {}", err);
                Err(err)
            }
        }
    }

    fn enter(&mut self, next: SystemState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("{} -> {}", self.state.mode_name(), next.mode_name());
        self.state = next;
    }
}

impl<const MAX: usize> Default for AppContext<MAX> {
    fn default() -> Self {
        Self::new()
    }
}
