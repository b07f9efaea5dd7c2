use crate::effect::FireworkEffect;
use heapless::Vec;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Every slot is taken. The store is unchanged.
    Full { capacity: usize },

    /// No saved effect at this index.
    IndexOutOfRange { index: usize, len: usize },

    /// The requested window is empty or reaches past the last saved effect.
    InvalidRange { min: usize, max: usize },
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::Full { capacity } => {
                write!(f, "effect store is full ({} effects)", capacity)
            }
            StoreError::IndexOutOfRange { index, len } => {
                write!(f, "no saved effect at index {} (store holds {})", index, len)
            }
            StoreError::InvalidRange { min, max } => {
                write!(f, "invalid effect range {}..={}", min, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

/// The effect being edited plus a bounded list of saved effects.
///
/// Saved effects keep the order they were saved in; that order is the
/// playback order of a firework river.
///
/// # Type Parameters
/// * `MAX` - Maximum number of saved effects
#[derive(Debug, Clone)]
pub struct EffectStore<const MAX: usize> {
    current: FireworkEffect,
    saved: Vec<FireworkEffect, MAX>,
}

impl<const MAX: usize> EffectStore<MAX> {
    /// Creates an empty store editing the default effect.
    pub fn new() -> Self {
        Self::with_current(FireworkEffect::default())
    }

    pub fn with_current(current: FireworkEffect) -> Self {
        Self {
            current,
            saved: Vec::new(),
        }
    }

    /// The effect being edited or played.
    pub fn current(&self) -> &FireworkEffect {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut FireworkEffect {
        &mut self.current
    }

    pub fn set_current(&mut self, effect: FireworkEffect) {
        self.current = effect;
    }

    /// Appends a copy of the current effect and returns its index.
    ///
    /// # Errors
    /// `Full` if all `MAX` slots are taken.
    pub fn save_current(&mut self) -> Result<usize, StoreError> {
        self.save(self.current)
    }

    /// Appends `effect` and returns its index.
    ///
    /// # Errors
    /// `Full` if all `MAX` slots are taken.
    pub fn save(&mut self, effect: FireworkEffect) -> Result<usize, StoreError> {
        self.saved
            .push(effect)
            .map_err(|_| StoreError::Full { capacity: MAX })?;
        Ok(self.saved.len() - 1)
    }

    /// Returns the saved effect at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if nothing is saved at `index`.
    pub fn get(&self, index: usize) -> Result<&FireworkEffect, StoreError> {
        self.saved.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.saved.len(),
        })
    }

    /// Copies the saved effect at `index` into the current slot.
    ///
    /// # Errors
    /// `IndexOutOfRange` if nothing is saved at `index`.
    pub fn load(&mut self, index: usize) -> Result<(), StoreError> {
        self.current = *self.get(index)?;
        Ok(())
    }

    /// Returns the saved effects from `min` to `max`, both inclusive.
    ///
    /// # Errors
    /// `InvalidRange` if `min > max` or `max` is past the last saved effect.
    pub fn range(&self, min: usize, max: usize) -> Result<&[FireworkEffect], StoreError> {
        if min > max || max >= self.saved.len() {
            return Err(StoreError::InvalidRange { min, max });
        }
        Ok(&self.saved[min..=max])
    }

    /// Saved effects in save order.
    pub fn iter(&self) -> impl Iterator<Item = &FireworkEffect> {
        self.saved.iter()
    }

    pub fn as_slice(&self) -> &[FireworkEffect] {
        &self.saved
    }

    /// Removes every saved effect. The current effect is kept.
    pub fn clear(&mut self) {
        self.saved.clear();
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.saved.is_full()
    }

    pub const fn capacity(&self) -> usize {
        MAX
    }
}

impl<const MAX: usize> Default for EffectStore<MAX> {
    fn default() -> Self {
        Self::new()
    }
}
