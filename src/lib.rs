#![no_std]
//! CrowPanel 7.0 Board Support
//!
//! Hardware description of the Elecrow CrowPanel 7.0: an 800x480 RGB
//! parallel TFT, PWM backlight and GT911 capacitive touch on an ESP32-S3.
//! The crate holds the configuration records and their validation; the
//! timing generator, LEDC and I2C drivers come from the HAL.
//!
//! ```
//! let device = crowpanel_bsp::board::crowpanel_7();
//! assert!(device.validate().is_ok());
//! assert_eq!(device.panel().config().panel_width, 800);
//! ```

/// Elecrow CrowPanel 7.0 pin map and timing.
pub mod board;

/// RGB-parallel bus configuration and LCD_CAM frame timing.
pub mod bus;

/// Composite display device.
pub mod device;

/// Configuration errors.
pub mod error;

/// ESP32-S3 GPIO bookkeeping.
pub mod gpio;

/// PWM backlight.
pub mod light;

/// Panel geometry.
pub mod panel;

/// Capacitive touch front end.
pub mod touch;

pub use device::Device;
pub use error::ConfigError;

#[cfg(test)]
extern crate alloc;
