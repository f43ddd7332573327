//! PWM backlight
//!
//! The backlight is driven by one LEDC channel. Brightness is an 8-bit value
//! scaled onto whatever duty resolution the PWM driver offers.

use bitflags::bitflags;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::ConfigError;
use crate::gpio::is_valid_gpio;

/// Number of LEDC channels on the ESP32-S3
pub const PWM_CHANNELS: u8 = 8;

/// Duty resolution the backlight timer runs at
pub const PWM_DUTY_BITS: u32 = 10;
/// LEDC low speed timers are clocked from APB
pub const PWM_SOURCE_CLOCK: u32 = 80_000_000;
/// Fastest PWM at [`PWM_DUTY_BITS`], divider 1
pub const PWM_FREQ_MAX: u32 = PWM_SOURCE_CLOCK >> PWM_DUTY_BITS;
/// Slowest PWM at [`PWM_DUTY_BITS`], the 10.8 fixed point divider tops out
/// just below 1024
pub const PWM_FREQ_MIN: u32 = (PWM_SOURCE_CLOCK >> (2 * PWM_DUTY_BITS)) + 1;

bitflags! {
    /// A set of LEDC channels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PwmChannels: u8 {
        const CH0 = 1 << 0;
        const CH1 = 1 << 1;
        const CH2 = 1 << 2;
        const CH3 = 1 << 3;
        const CH4 = 1 << 4;
        const CH5 = 1 << 5;
        const CH6 = 1 << 6;
        const CH7 = 1 << 7;
    }
}

impl PwmChannels {
    /// The single channel `index`, or `None` past the last channel.
    pub fn channel(index: u8) -> Option<Self> {
        (index < PWM_CHANNELS).then(|| Self::from_bits_retain(1 << index))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PwmChannels {
    fn format(&self, f: defmt::Formatter) {
        self.iter_names().for_each(|name| {
            defmt::write!(f, "{}", name.0);
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightConfig {
    pub pin_bl: u8,
    /// Full brightness drives the pin low
    pub invert: bool,
    /// PWM frequency in Hz
    pub freq: u32,
    pub pwm_channel: u8,
}

impl LightConfig {
    /// Checks the pin, the frequency and that the channel exists and is not
    /// one of the `reserved` channels.
    pub fn validate(&self, reserved: PwmChannels) -> Result<(), ConfigError> {
        if !is_valid_gpio(self.pin_bl) {
            return Err(ConfigError::InvalidPin(self.pin_bl));
        }
        let channel = PwmChannels::channel(self.pwm_channel)
            .ok_or(ConfigError::PwmChannelOutOfRange(self.pwm_channel))?;
        if reserved.intersects(channel) {
            return Err(ConfigError::PwmChannelInUse(self.pwm_channel));
        }
        if !(PWM_FREQ_MIN..=PWM_FREQ_MAX).contains(&self.freq) {
            return Err(ConfigError::PwmFrequency(self.freq));
        }
        Ok(())
    }

    /// Duty cycle for `brightness` (0..=255) given the driver's maximum duty.
    pub fn duty(&self, brightness: u8, max_duty: u16) -> u16 {
        let duty = (u32::from(brightness) * u32::from(max_duty) / u32::from(u8::MAX)) as u16;
        if self.invert {
            max_duty - duty
        } else {
            duty
        }
    }
}

/// The backlight driver slot of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Light {
    config: LightConfig,
}

impl Light {
    pub fn new(config: LightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Sets the brightness on the PWM output bound to this backlight.
    pub fn set_brightness<P>(&self, pwm: &mut P, brightness: u8) -> Result<(), P::Error>
    where
        P: SetDutyCycle,
    {
        let duty = self.config.duty(brightness, pwm.max_duty_cycle());
        pwm.set_duty_cycle(duty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    struct FakePwm {
        max: u16,
        duty: u16,
    }

    impl ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_channel_set() {
        assert_eq!(PwmChannels::channel(0), Some(PwmChannels::CH0));
        assert_eq!(PwmChannels::channel(7), Some(PwmChannels::CH7));
        assert_eq!(PwmChannels::channel(8), None);
    }

    #[test]
    fn test_validate_channel() {
        let config = board::light_config();
        assert_eq!(config.validate(PwmChannels::empty()), Ok(()));
        assert_eq!(
            config.validate(PwmChannels::CH0 | PwmChannels::CH1),
            Ok(())
        );
        assert_eq!(
            config.validate(PwmChannels::CH7),
            Err(ConfigError::PwmChannelInUse(7))
        );

        let config = LightConfig {
            pwm_channel: 8,
            ..board::light_config()
        };
        assert_eq!(
            config.validate(PwmChannels::empty()),
            Err(ConfigError::PwmChannelOutOfRange(8))
        );
    }

    #[test]
    fn test_validate_pin_and_frequency() {
        let config = LightConfig {
            pin_bl: 22,
            ..board::light_config()
        };
        assert_eq!(
            config.validate(PwmChannels::empty()),
            Err(ConfigError::InvalidPin(22))
        );

        let config = LightConfig {
            freq: 0,
            ..board::light_config()
        };
        assert_eq!(
            config.validate(PwmChannels::empty()),
            Err(ConfigError::PwmFrequency(0))
        );
    }

    #[test]
    fn test_validate_frequency_reachable_at_duty_resolution() {
        assert_eq!(PWM_FREQ_MAX, 78_125);
        assert_eq!(PWM_FREQ_MIN, 77);

        let at = |freq| {
            LightConfig {
                freq,
                ..board::light_config()
            }
            .validate(PwmChannels::empty())
        };
        assert_eq!(at(PWM_FREQ_MAX), Ok(()));
        assert_eq!(at(PWM_FREQ_MIN), Ok(()));
        assert_eq!(at(100_000), Err(ConfigError::PwmFrequency(100_000)));
        assert_eq!(at(76), Err(ConfigError::PwmFrequency(76)));
    }

    #[test]
    fn test_duty() {
        let config = board::light_config();
        assert_eq!(config.duty(0, 1023), 0);
        assert_eq!(config.duty(255, 1023), 1023);
        assert_eq!(config.duty(128, 100), 50);

        let inverted = LightConfig {
            invert: true,
            ..config
        };
        assert_eq!(inverted.duty(0, 1023), 1023);
        assert_eq!(inverted.duty(255, 1023), 0);
    }

    #[test]
    fn test_set_brightness() {
        let light = Light::new(board::light_config());
        let mut pwm = FakePwm { max: 255, duty: 0 };
        light.set_brightness(&mut pwm, 200).unwrap();
        assert_eq!(pwm.duty, 200);
        light.set_brightness(&mut pwm, 0).unwrap();
        assert_eq!(pwm.duty, 0);
    }
}
