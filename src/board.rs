//! Elecrow CrowPanel 7.0
//!
//! 800x480 RGB565 TFT on the ESP32-S3 LCD_CAM peripheral, PWM backlight and
//! a GT911 touch controller on I2C1. The timing values come from a known
//! working panel setup and must not be recomputed.

use crate::bus::{Bus, BusConfig};
use crate::device::Device;
use crate::light::{Light, LightConfig};
use crate::panel::{Panel, PanelConfig, BYTES_PER_PIXEL};
use crate::touch::{I2cPort, Touch, TouchAddress, TouchConfig};

/// Display resolution width in pixels
pub const DISPLAY_WIDTH: u16 = 800;
/// Display resolution height in pixels
pub const DISPLAY_HEIGHT: u16 = 480;
/// One visible RGB565 line, sizes static line buffers
pub const LINE_BYTES: usize = DISPLAY_WIDTH as usize * BYTES_PER_PIXEL;

/// Pixel clock, 12MHz is flicker free on this panel
pub const PCLK_FREQ: u32 = 12_000_000;

/// Backlight PWM frequency in Hz
pub const BACKLIGHT_FREQ: u32 = 12_000;
/// LEDC channel driving the backlight
pub const BACKLIGHT_PWM_CHANNEL: u8 = 7;

/// GT911 address with INT high at reset
pub const TOUCH_ADDRESS: TouchAddress = TouchAddress::Gt911High;
/// Touch I2C clock in Hz
pub const TOUCH_I2C_FREQ: u32 = 400_000;

pub const fn bus_config() -> BusConfig {
    BusConfig {
        pin_d0: 15, // B0
        pin_d1: 7,  // B1
        pin_d2: 6,  // B2
        pin_d3: 5,  // B3
        pin_d4: 4,  // B4

        pin_d5: 9,   // G0
        pin_d6: 46,  // G1
        pin_d7: 3,   // G2
        pin_d8: 8,   // G3
        pin_d9: 16,  // G4
        pin_d10: 1,  // G5

        pin_d11: 14, // R0
        pin_d12: 21, // R1
        pin_d13: 47, // R2
        pin_d14: 48, // R3
        pin_d15: 45, // R4

        pin_henable: 41,
        pin_vsync: 40,
        pin_hsync: 39,
        pin_pclk: 0,
        freq_write: PCLK_FREQ,

        hsync_polarity: false,
        hsync_front_porch: 40,
        hsync_pulse_width: 48,
        hsync_back_porch: 40,

        vsync_polarity: false,
        vsync_front_porch: 1,
        vsync_pulse_width: 31,
        vsync_back_porch: 13,

        pclk_active_neg: true,
        de_idle_high: false,
        pclk_idle_high: false,
    }
}

pub const fn panel_config() -> PanelConfig {
    PanelConfig {
        memory_width: DISPLAY_WIDTH,
        memory_height: DISPLAY_HEIGHT,
        panel_width: DISPLAY_WIDTH,
        panel_height: DISPLAY_HEIGHT,
        offset_x: 0,
        offset_y: 0,
    }
}

pub const fn light_config() -> LightConfig {
    LightConfig {
        pin_bl: 2,
        invert: false,
        freq: BACKLIGHT_FREQ,
        pwm_channel: BACKLIGHT_PWM_CHANNEL,
    }
}

pub const fn touch_config() -> TouchConfig {
    TouchConfig {
        x_min: 0,
        x_max: DISPLAY_WIDTH - 1,
        y_min: 0,
        y_max: DISPLAY_HEIGHT - 1,
        bus_shared: true,
        i2c_port: I2cPort::I2c1,
        pin_sda: 19,
        pin_scl: 20,
        i2c_addr: TOUCH_ADDRESS,
        freq: TOUCH_I2C_FREQ,
    }
}

/// Builds the CrowPanel 7.0 display device.
///
/// The bus is bound to the panel before its geometry is set, and backlight
/// and touch are attached before the panel is registered with the device.
pub fn crowpanel_7() -> Device {
    let mut panel = Panel::new(Bus::new(bus_config()));

    panel.set_config(panel_config());

    panel.set_light(Light::new(light_config()));

    panel.set_touch(Touch::new(touch_config()));

    Device::new(panel)
}
