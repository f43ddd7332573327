//! ESP32-S3 GPIO bookkeeping
//!
//! The ESP32-S3 exposes GPIO0..=GPIO21 and GPIO26..=GPIO48. GPIO22..=GPIO25
//! do not exist on the die.

use crate::error::ConfigError;

/// Highest GPIO number on the ESP32-S3
pub const GPIO_MAX: u8 = 48;

/// Returns true when `pin` names a GPIO that exists on the ESP32-S3.
pub const fn is_valid_gpio(pin: u8) -> bool {
    matches!(pin, 0..=21 | 26..=GPIO_MAX)
}

/// A set of claimed GPIOs used to detect double assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSet(u64);

impl PinSet {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Claims `pin`, failing if it does not exist or was already claimed.
    pub fn claim(&mut self, pin: u8) -> Result<(), ConfigError> {
        if !is_valid_gpio(pin) {
            return Err(ConfigError::InvalidPin(pin));
        }
        if self.contains(pin) {
            return Err(ConfigError::PinConflict(pin));
        }
        self.0 |= 1u64 << pin;
        Ok(())
    }

    /// Claims every pin in `pins`, stopping at the first failure.
    pub fn claim_all(&mut self, pins: &[u8]) -> Result<(), ConfigError> {
        pins.iter().try_for_each(|&pin| self.claim(pin))
    }

    pub fn contains(&self, pin: u8) -> bool {
        pin <= GPIO_MAX && self.0 & (1u64 << pin) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
