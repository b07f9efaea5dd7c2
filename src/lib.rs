#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`FireworkEffect`**: One firework's colors, brightness, modes and timing
//! - **`LaunchMode` / `GradientMode` / `ExplodeMode` / `LaserColor`**: Mode sets of an effect
//! - **`ExplosionParams` / `AscendParams` / `BarsWithGapParams`**: Animation phase parameters
//! - **`SystemState`**: The device's operating mode, changed only through `SystemState::transition`
//! - **`EffectStore`**: The edited effect plus a bounded list of saved effects
//! - **`AppContext`**: Mode, store and counters of one device, passed explicitly
//! - **`Message`**: One line of the serial protocol (`S`, `P`, `V`, `T`, mode announcements)
//! - **`EffectPlayer`**: Plays saved effects back to back through an `EffectSink`
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are stored as 8-bit [`Rgb`]; blending and HSV conversion go through
//! `palette` in floating point.

pub mod color;
pub mod command;
pub mod config;
pub mod context;
pub mod effect;
pub mod input;
pub mod params;
pub mod player;
pub mod protocol;
pub mod state;
pub mod store;
pub mod time;
pub mod types;

pub use color::Rgb;
pub use command::ControlAction;
pub use context::{AppContext, ContextError};
pub use effect::{EffectBuilder, EffectError, FireworkEffect};
pub use input::ControlReadings;
pub use params::{AscendParams, BarsWithGapParams, ExplosionParams};
pub use player::{EffectPlayer, EffectSink, PlayerError, PlayerState, ServiceTiming};
pub use protocol::{FrameRevision, LineAssembler, Message, ProtocolError, TestData, parse_line};
pub use state::{SystemState, TransitionError};
pub use store::{EffectStore, StoreError};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{
    ExplodeMode, ExplodeModeRevision, GradientMode, InvalidModeCode, LaserColor, LaunchMode,
    LegacyExplodeMode,
};

/// Effect store sized for the device.
pub type DeviceStore = EffectStore<{ config::MAX_SAVED_EFFECTS }>;

/// Application context sized for the device.
pub type DeviceContext = AppContext<{ config::MAX_SAVED_EFFECTS }>;
