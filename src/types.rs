//! Mode enums that make up a firework effect.
//!
//! Every mode travels over the serial link as a small integer code; the
//! `TryFrom<u8>` impls are the only way a code becomes a mode, so an effect
//! can never hold a value outside its declared variant set.

/// A mode code that does not name any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidModeCode(pub u8);

impl core::fmt::Display for InvalidModeCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown mode code {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidModeCode {}

/// How the simulated firework rises before it explodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaunchMode {
    /// Smooth climb.
    #[default]
    NormalAscend,

    /// Climb in discrete jumps.
    StepAscend,

    /// Swinging climb.
    PendulumAscend,
}

impl LaunchMode {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for LaunchMode {
    type Error = InvalidModeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LaunchMode::NormalAscend),
            1 => Ok(LaunchMode::StepAscend),
            2 => Ok(LaunchMode::PendulumAscend),
            other => Err(InvalidModeCode(other)),
        }
    }
}

/// How `color1` and `color2` blend over the life of the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GradientMode {
    /// Spatial gradient from `color1` to `color2` along the strip.
    #[default]
    Gradient,

    /// Fade from `color1` to `color2` over time.
    Fade,

    /// Hard switch from `color1` to `color2` halfway through.
    Switch,
}

impl GradientMode {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Color at `progress` (`0.0..=1.0`) between the two effect colors.
    pub fn color_at(self, color1: crate::Rgb, color2: crate::Rgb, progress: f32) -> crate::Rgb {
        match self {
            GradientMode::Gradient | GradientMode::Fade => color1.blend(color2, progress),
            GradientMode::Switch => {
                if progress < 0.5 {
                    color1
                } else {
                    color2
                }
            }
        }
    }
}

impl TryFrom<u8> for GradientMode {
    type Error = InvalidModeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(GradientMode::Gradient),
            1 => Ok(GradientMode::Fade),
            2 => Ok(GradientMode::Switch),
            other => Err(InvalidModeCode(other)),
        }
    }
}

/// Visual pattern of the explosion phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplodeMode {
    #[default]
    Normal,
    Blink,
    Random,
}

impl ExplodeMode {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ExplodeMode {
    type Error = InvalidModeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ExplodeMode::Normal),
            1 => Ok(ExplodeMode::Blink),
            2 => Ok(ExplodeMode::Random),
            other => Err(InvalidModeCode(other)),
        }
    }
}

/// Explosion patterns of the first firmware revision.
///
/// Codes `1` and `2` meant different things before [`ExplodeMode`] replaced
/// this set, so saved data must say which revision it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegacyExplodeMode {
    Normal,
    Shatter,
    Star,
}

impl TryFrom<u8> for LegacyExplodeMode {
    type Error = InvalidModeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LegacyExplodeMode::Normal),
            1 => Ok(LegacyExplodeMode::Shatter),
            2 => Ok(LegacyExplodeMode::Star),
            other => Err(InvalidModeCode(other)),
        }
    }
}

impl From<LegacyExplodeMode> for ExplodeMode {
    fn from(mode: LegacyExplodeMode) -> Self {
        match mode {
            LegacyExplodeMode::Normal => ExplodeMode::Normal,
            // Shards scatter over random LEDs.
            LegacyExplodeMode::Shatter => ExplodeMode::Random,
            // Twinkling stars.
            LegacyExplodeMode::Star => ExplodeMode::Blink,
        }
    }
}

/// An explode-mode value tagged with the revision that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplodeModeRevision {
    V1(LegacyExplodeMode),
    V2(ExplodeMode),
}

impl ExplodeModeRevision {
    /// Resolves the value into the current explode-mode set.
    pub fn current(self) -> ExplodeMode {
        match self {
            ExplodeModeRevision::V1(legacy) => legacy.into(),
            ExplodeModeRevision::V2(mode) => mode,
        }
    }
}

/// Color of the laser pointer bounced off the mirror servo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaserColor {
    #[default]
    None,
    Green,
    Red,
}

impl LaserColor {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Next color in the laser button cycle: none, green, red, none.
    pub const fn next(self) -> Self {
        match self {
            LaserColor::None => LaserColor::Green,
            LaserColor::Green => LaserColor::Red,
            LaserColor::Red => LaserColor::None,
        }
    }
}

impl TryFrom<u8> for LaserColor {
    type Error = InvalidModeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LaserColor::None),
            1 => Ok(LaserColor::Green),
            2 => Ok(LaserColor::Red),
            other => Err(InvalidModeCode(other)),
        }
    }
}
