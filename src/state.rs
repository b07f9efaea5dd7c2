//! Top-level operating mode of the device.
//!
//! [`SystemState`] is a closed set of five modes and [`SystemState::transition`]
//! is the only way to move between them. Invalid actions are rejected and
//! leave the mode untouched.

use crate::command::ControlAction;

/// The device's current top-level mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemState {
    /// Waiting for input. The strip is dark.
    #[default]
    Idle,
    /// Editing the current effect with sliders and joysticks.
    Customize,
    /// Playing the current effect on the preview section.
    Preview,
    /// Storing the current effect.
    Save,
    /// Playing back saved effects.
    PlaySaved,
}

/// Error returned when an action is not valid in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionError {
    InvalidTransition {
        from: SystemState,
        action: ControlAction,
    },
}

impl core::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransitionError::InvalidTransition { from, action } => {
                write!(f, "action {:?} is not valid in {:?}", action, from)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransitionError {}

impl SystemState {
    /// Every mode, in declaration order.
    pub const ALL: [SystemState; 5] = [
        SystemState::Idle,
        SystemState::Customize,
        SystemState::Preview,
        SystemState::Save,
        SystemState::PlaySaved,
    ];

    /// Name shown on the LCD and announced on the serial link.
    pub const fn mode_name(self) -> &'static str {
        match self {
            SystemState::Idle => "IDLE MODE",
            SystemState::Customize => "CUSTOMIZE MODE",
            SystemState::Preview => "PREVIEW MODE",
            SystemState::Save => "SAVE MODE",
            SystemState::PlaySaved => "PLAY MODE",
        }
    }

    /// Parses a mode announcement line.
    pub fn from_mode_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.mode_name() == name)
    }

    /// Returns the mode `action` leads to from `self`.
    ///
    /// # Errors
    /// `InvalidTransition` if the action has no meaning in this mode.
    pub fn transition(self, action: ControlAction) -> Result<SystemState, TransitionError> {
        use ControlAction as A;
        use SystemState as S;

        let next = match (self, action) {
            (S::Idle, A::Customize) => S::Customize,
            (S::Idle, A::Play) => S::PlaySaved,

            (S::Customize, A::Preview) => S::Preview,
            (S::Customize, A::Save) => S::Save,
            (S::Customize, A::Cancel) => S::Idle,

            (S::Preview, A::Customize | A::Cancel) => S::Customize,
            (S::Preview, A::Save) => S::Save,

            (S::Save, A::Finished | A::Cancel) => S::Idle,
            (S::Save, A::Play) => S::PlaySaved,

            (S::PlaySaved, A::Finished | A::Cancel) => S::Idle,

            (from, action) => return Err(TransitionError::InvalidTransition { from, action }),
        };

        Ok(next)
    }
}
