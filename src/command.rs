//! User actions that drive the operating mode.

/// Actions raised by the buttons or by the host over the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlAction {
    /// Enter or return to the effect editor.
    Customize,
    /// Show the edited effect on the preview section of the strip.
    Preview,
    /// Store the edited effect.
    Save,
    /// Play saved effects.
    Play,
    /// Abandon the current mode.
    Cancel,
    /// The current mode ran to completion.
    Finished,
}

impl ControlAction {
    /// Maps a front-panel button to the action it raises.
    ///
    /// The ascend and laser buttons act on the effect, not on the mode, and
    /// map to `None`.
    pub fn from_button_pin(pin: u8) -> Option<Self> {
        use crate::config::{CUSTOMIZE_BUTTON_PIN, PREVIEW_BUTTON_PIN, SAVE_BUTTON_PIN};

        match pin {
            CUSTOMIZE_BUTTON_PIN => Some(ControlAction::Customize),
            PREVIEW_BUTTON_PIN => Some(ControlAction::Preview),
            SAVE_BUTTON_PIN => Some(ControlAction::Save),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ASCEND_BUTTON_PIN, LASER_BUTTON_PIN, SAVE_BUTTON_PIN};

    #[test]
    fn mode_buttons_map_to_actions() {
        assert_eq!(
            ControlAction::from_button_pin(SAVE_BUTTON_PIN),
            Some(ControlAction::Save)
        );
        assert_eq!(ControlAction::from_button_pin(ASCEND_BUTTON_PIN), None);
        assert_eq!(ControlAction::from_button_pin(LASER_BUTTON_PIN), None);
    }
}
