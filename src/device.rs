//! The display device and whole-board validation
//!
//! Each sub-configuration checks itself; [`Device::validate_with`] also
//! catches a GPIO claimed by two of them and a backlight on an LEDC channel
//! the caller already uses.
//!
//! ```
//! use crowpanel_bsp::board::crowpanel_7;
//! use crowpanel_bsp::light::PwmChannels;
//! use crowpanel_bsp::ConfigError;
//!
//! let device = crowpanel_7();
//! assert_eq!(device.validate_with(PwmChannels::CH0), Ok(()));
//! assert_eq!(
//!     device.validate_with(PwmChannels::CH7),
//!     Err(ConfigError::PwmChannelInUse(7))
//! );
//! ```

use log::{debug, warn};

use crate::error::ConfigError;
use crate::gpio::PinSet;
use crate::light::PwmChannels;
use crate::panel::Panel;

/// The display device. Owns the active panel, which owns everything else.
///
/// Once registered the panel is only reachable through shared references, so
/// the wiring cannot change after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Device {
    panel: Panel,
}

impl Device {
    /// Registers `panel` as the active panel.
    pub fn new(panel: Panel) -> Self {
        debug!(
            "device: panel registered (backlight: {}, touch: {})",
            panel.light().is_some(),
            panel.touch().is_some()
        );
        Self { panel }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Validates the whole board with no PWM channels claimed elsewhere.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_with(PwmChannels::empty())
    }

    /// Validates every sub-configuration, then checks that no GPIO is shared
    /// between the bus, the backlight and the touch bus. `reserved` lists
    /// LEDC channels the rest of the firmware already uses.
    pub fn validate_with(&self, reserved: PwmChannels) -> Result<(), ConfigError> {
        self.check(reserved).inspect_err(|e| warn!("device: {}", e))
    }

    fn check(&self, reserved: PwmChannels) -> Result<(), ConfigError> {
        self.panel.validate()?;

        let mut pins = PinSet::new();
        pins.claim_all(&self.panel.bus().config().pins())?;

        if let Some(light) = self.panel.light() {
            light.config().validate(reserved)?;
            pins.claim(light.config().pin_bl)?;
        }

        if let Some(touch) = self.panel.touch() {
            touch.config().validate()?;
            pins.claim_all(&touch.config().pins())?;
        }

        debug!("device: {} GPIOs claimed", pins.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use crate::bus::Bus;
    use crate::light::{Light, LightConfig};
    use crate::touch::{Touch, TouchConfig};

    fn wired_panel() -> Panel {
        let mut panel = Panel::new(Bus::new(board::bus_config()));
        panel.set_config(board::panel_config());
        panel
    }

    #[test]
    fn test_panel_without_attachments_validates() {
        let device = Device::new(wired_panel());
        assert_eq!(device.validate(), Ok(()));
    }

    #[test]
    fn test_backlight_on_bus_pin() {
        let mut panel = wired_panel();
        panel.set_light(Light::new(LightConfig {
            pin_bl: 41,
            ..board::light_config()
        }));
        let device = Device::new(panel);
        assert_eq!(device.validate(), Err(ConfigError::PinConflict(41)));
    }

    #[test]
    fn test_touch_on_backlight_pin() {
        let mut panel = wired_panel();
        panel.set_light(Light::new(board::light_config()));
        panel.set_touch(Touch::new(TouchConfig {
            pin_scl: 2,
            ..board::touch_config()
        }));
        let device = Device::new(panel);
        assert_eq!(device.validate(), Err(ConfigError::PinConflict(2)));
    }

    #[test]
    fn test_reserved_pwm_channel() {
        let device = board::crowpanel_7();
        assert_eq!(device.validate_with(PwmChannels::CH0), Ok(()));
        assert_eq!(
            device.validate_with(PwmChannels::CH6 | PwmChannels::CH7),
            Err(ConfigError::PwmChannelInUse(7))
        );
    }
}
