use core::fmt::{self, Display, Formatter};

/// Errors reported when a board configuration does not fit the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number is not a usable ESP32-S3 GPIO
    InvalidPin(u8),
    /// Pin is assigned to more than one signal
    PinConflict(u8),
    /// Pixel clock outside of what the LCD_CAM peripheral can generate
    PixelClockOutOfRange(u32),
    /// Visible area or offset does not fit in the frame memory
    GeometryOutOfBounds,
    /// Porch or pulse values overflow the LCD_CAM timing registers
    TimingOutOfRange,
    /// LEDC only has channels 0..=7
    PwmChannelOutOfRange(u8),
    /// LEDC channel already claimed by another user
    PwmChannelInUse(u8),
    /// PWM frequency not reachable by LEDC at the backlight duty resolution
    PwmFrequency(u32),
    /// Touch bounds are empty or inverted
    TouchBounds,
    /// Not one of the GT911 addresses
    TouchAddress(u8),
    /// ESP32-S3 only has I2C0 and I2C1
    I2cPort(u8),
    /// I2C clock outside of 1Hz..=400kHz
    I2cFrequency(u32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPin(pin) => write!(f, "GPIO{pin} is not usable"),
            ConfigError::PinConflict(pin) => write!(f, "GPIO{pin} is assigned twice"),
            ConfigError::PixelClockOutOfRange(hz) => {
                write!(f, "pixel clock {hz}Hz is out of range")
            }
            ConfigError::GeometryOutOfBounds => write!(f, "panel does not fit in frame memory"),
            ConfigError::TimingOutOfRange => write!(f, "frame timing overflows LCD_CAM registers"),
            ConfigError::PwmChannelOutOfRange(ch) => write!(f, "PWM channel {ch} does not exist"),
            ConfigError::PwmChannelInUse(ch) => write!(f, "PWM channel {ch} is already in use"),
            ConfigError::PwmFrequency(hz) => write!(f, "PWM frequency {hz}Hz is out of range"),
            ConfigError::TouchBounds => write!(f, "touch bounds are empty"),
            ConfigError::TouchAddress(addr) => write!(f, "0x{addr:02X} is not a GT911 address"),
            ConfigError::I2cPort(port) => write!(f, "I2C port {port} does not exist"),
            ConfigError::I2cFrequency(hz) => write!(f, "I2C clock {hz}Hz is out of range"),
        }
    }
}
