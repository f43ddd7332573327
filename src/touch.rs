//! Capacitive touch front end
//!
//! The GT911 sits on an I2C bus and answers on one of two addresses chosen
//! by the level of its INT line at reset. Only the addressing, bus and
//! coordinate mapping live here; the register protocol belongs to the touch
//! driver.

use embedded_hal::i2c::I2c;
use log::debug;
use num_enum::{IntoPrimitive, TryFromPrimitive, TryFromPrimitiveError};

use crate::error::ConfigError;
use crate::gpio::PinSet;
use crate::panel::PanelConfig;

/// Fastest clock the GT911 supports
pub const I2C_FREQ_MAX: u32 = 400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cPort {
    I2c0 = 0,
    I2c1 = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchAddress {
    /// INT held low during reset
    Gt911Low = 0x5D,
    /// INT held high during reset
    Gt911High = 0x14,
}

impl From<TryFromPrimitiveError<I2cPort>> for ConfigError {
    fn from(e: TryFromPrimitiveError<I2cPort>) -> Self {
        ConfigError::I2cPort(e.number)
    }
}

impl From<TryFromPrimitiveError<TouchAddress>> for ConfigError {
    fn from(e: TryFromPrimitiveError<TouchAddress>) -> Self {
        ConfigError::TouchAddress(e.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    /// The I2C bus is also used by other devices
    pub bus_shared: bool,
    pub i2c_port: I2cPort,
    pub pin_sda: u8,
    pub pin_scl: u8,
    pub i2c_addr: TouchAddress,
    /// I2C clock in Hz
    pub freq: u32,
}

impl TouchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(ConfigError::TouchBounds);
        }
        PinSet::new().claim_all(&self.pins())?;
        if !(1..=I2C_FREQ_MAX).contains(&self.freq) {
            return Err(ConfigError::I2cFrequency(self.freq));
        }
        Ok(())
    }

    /// SDA, SCL
    pub fn pins(&self) -> [u8; 2] {
        [self.pin_sda, self.pin_scl]
    }

    /// Maps a raw controller coordinate onto panel pixels. Points outside the
    /// configured bounds yield `None`.
    pub fn map_raw(&self, x: u16, y: u16, panel: &PanelConfig) -> Option<(u16, u16)> {
        let x = scale(x, self.x_min, self.x_max, panel.panel_width)?;
        let y = scale(y, self.y_min, self.y_max, panel.panel_height)?;
        Some((x, y))
    }
}

fn scale(raw: u16, min: u16, max: u16, size: u16) -> Option<u16> {
    if raw < min || raw > max || min >= max || size == 0 {
        return None;
    }
    let span = u32::from(max - min);
    let scaled = u32::from(raw - min) * u32::from(size - 1) / span;
    Some(scaled as u16)
}

/// The touch driver slot of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Touch {
    config: TouchConfig,
}

impl Touch {
    pub fn new(config: TouchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Returns true when the controller acknowledges its address on `i2c`.
    pub fn is_present<I>(&self, i2c: &mut I) -> bool
    where
        I: I2c,
    {
        let address = u8::from(self.config.i2c_addr);
        let present = i2c.write(address, &[]).is_ok();
        debug!("touch: check 0x{:02X} -> {}", address, present);
        present
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    struct FakeBus {
        device: Option<u8>,
        last_address: Option<u8>,
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = Some(address);
            if self.device == Some(address) {
                Ok(())
            } else {
                Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
            }
        }
    }

    #[test]
    fn test_address_from_u8() {
        assert_eq!(TouchAddress::try_from(0x14), Ok(TouchAddress::Gt911High));
        assert_eq!(TouchAddress::try_from(0x5D), Ok(TouchAddress::Gt911Low));
        let err: ConfigError = TouchAddress::try_from(0x15).unwrap_err().into();
        assert_eq!(err, ConfigError::TouchAddress(0x15));
    }

    #[test]
    fn test_port_from_u8() {
        assert_eq!(I2cPort::try_from(1), Ok(I2cPort::I2c1));
        let err: ConfigError = I2cPort::try_from(2).unwrap_err().into();
        assert_eq!(err, ConfigError::I2cPort(2));
    }

    #[test]
    fn test_validate() {
        assert_eq!(board::touch_config().validate(), Ok(()));

        let config = TouchConfig {
            x_max: 0,
            ..board::touch_config()
        };
        assert_eq!(config.validate(), Err(ConfigError::TouchBounds));

        let config = TouchConfig {
            pin_scl: 19,
            ..board::touch_config()
        };
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(19)));

        let config = TouchConfig {
            freq: 1_000_000,
            ..board::touch_config()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::I2cFrequency(1_000_000))
        );
    }

    #[test]
    fn test_map_raw_corners() {
        let config = board::touch_config();
        let panel = board::panel_config();
        assert_eq!(config.map_raw(0, 0, &panel), Some((0, 0)));
        assert_eq!(config.map_raw(799, 479, &panel), Some((799, 479)));
        assert_eq!(config.map_raw(400, 240, &panel), Some((400, 240)));
        assert_eq!(config.map_raw(800, 0, &panel), None);
        assert_eq!(config.map_raw(0, 480, &panel), None);
    }

    #[test]
    fn test_map_raw_scales_larger_range() {
        let config = TouchConfig {
            x_min: 100,
            x_max: 4095,
            y_min: 0,
            y_max: 4095,
            ..board::touch_config()
        };
        let panel = board::panel_config();
        assert_eq!(config.map_raw(99, 0, &panel), None);
        assert_eq!(config.map_raw(100, 0, &panel), Some((0, 0)));
        assert_eq!(config.map_raw(4095, 4095, &panel), Some((799, 479)));
    }

    #[test]
    fn test_presence() {
        let touch = Touch::new(board::touch_config());

        let mut bus = FakeBus {
            device: Some(0x14),
            last_address: None,
        };
        assert!(touch.is_present(&mut bus));
        assert_eq!(bus.last_address, Some(0x14));

        let mut bus = FakeBus {
            device: Some(0x5D),
            last_address: None,
        };
        assert!(!touch.is_present(&mut bus));
    }
}
