//! Hardware initialization modules
//!
//! This module provides organized initialization functions for all hardware
//! components of the CrowPanel 7.0:
//!
//! - **Display**: RGB panel via the LCD_CAM peripheral in DPI mode
//! - **Backlight**: PWM via an LEDC low speed channel
//! - **Touch**: shared I2C bus of the GT911 controller

pub mod backlight;
pub mod display;
pub mod touch;

// Re-export commonly used types and functions for convenience
pub use backlight::initialize_backlight;
pub use display::{initialize_display, start_color_bars, RgbPins};
pub use touch::initialize_touch_bus;
