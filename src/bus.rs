//! RGB-parallel (DPI) bus configuration
//!
//! The bus carries RGB565 pixels over 16 data lines plus the DE, VSYNC,
//! HSYNC and PCLK control lines. Timing values follow the usual datasheet
//! notation (front porch, pulse width, back porch) and are converted into
//! the LCD_CAM register layout by [`BusConfig::frame_timing`].

use crate::error::ConfigError;
use crate::gpio::PinSet;
use crate::panel::PanelConfig;

/// Number of parallel data lines
pub const DATA_LINES: usize = 16;

/// Lowest pixel clock accepted for the LCD_CAM DPI mode
pub const PCLK_FREQ_MIN: u32 = 1_000_000;
/// Highest pixel clock the LCD_CAM can sustain while streaming from PSRAM
pub const PCLK_FREQ_MAX: u32 = 40_000_000;

// LCD_CAM timing register widths
const HORIZONTAL_TOTAL_MAX: usize = 4096;
const HORIZONTAL_FRONT_MAX: usize = 2048;
const VERTICAL_TOTAL_MAX: usize = 1024;
const VERTICAL_FRONT_MAX: usize = 256;
const SYNC_WIDTH_MAX: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    // Blue
    pub pin_d0: u8,
    pub pin_d1: u8,
    pub pin_d2: u8,
    pub pin_d3: u8,
    pub pin_d4: u8,
    // Green
    pub pin_d5: u8,
    pub pin_d6: u8,
    pub pin_d7: u8,
    pub pin_d8: u8,
    pub pin_d9: u8,
    pub pin_d10: u8,
    // Red
    pub pin_d11: u8,
    pub pin_d12: u8,
    pub pin_d13: u8,
    pub pin_d14: u8,
    pub pin_d15: u8,

    /// Data enable
    pub pin_henable: u8,
    pub pin_vsync: u8,
    pub pin_hsync: u8,
    pub pin_pclk: u8,

    /// Pixel clock in Hz
    pub freq_write: u32,

    /// true: HSYNC idles high
    pub hsync_polarity: bool,
    pub hsync_front_porch: u16,
    pub hsync_pulse_width: u16,
    pub hsync_back_porch: u16,

    /// true: VSYNC idles high
    pub vsync_polarity: bool,
    pub vsync_front_porch: u16,
    pub vsync_pulse_width: u16,
    pub vsync_back_porch: u16,

    /// Data is shifted out on the falling edge of PCLK
    pub pclk_active_neg: bool,
    pub de_idle_high: bool,
    pub pclk_idle_high: bool,
}

impl BusConfig {
    /// Data line pins in order D0..D15
    pub fn data_pins(&self) -> [u8; DATA_LINES] {
        [
            self.pin_d0,
            self.pin_d1,
            self.pin_d2,
            self.pin_d3,
            self.pin_d4,
            self.pin_d5,
            self.pin_d6,
            self.pin_d7,
            self.pin_d8,
            self.pin_d9,
            self.pin_d10,
            self.pin_d11,
            self.pin_d12,
            self.pin_d13,
            self.pin_d14,
            self.pin_d15,
        ]
    }

    /// Control pins in order DE, VSYNC, HSYNC, PCLK
    pub fn control_pins(&self) -> [u8; 4] {
        [
            self.pin_henable,
            self.pin_vsync,
            self.pin_hsync,
            self.pin_pclk,
        ]
    }

    /// B0..B4
    pub fn blue_pins(&self) -> [u8; 5] {
        [
            self.pin_d0,
            self.pin_d1,
            self.pin_d2,
            self.pin_d3,
            self.pin_d4,
        ]
    }

    /// G0..G5
    pub fn green_pins(&self) -> [u8; 6] {
        [
            self.pin_d5,
            self.pin_d6,
            self.pin_d7,
            self.pin_d8,
            self.pin_d9,
            self.pin_d10,
        ]
    }

    /// R0..R4
    pub fn red_pins(&self) -> [u8; 5] {
        [
            self.pin_d11,
            self.pin_d12,
            self.pin_d13,
            self.pin_d14,
            self.pin_d15,
        ]
    }

    /// Every pin of the bus, data lines first.
    pub fn pins(&self) -> [u8; DATA_LINES + 4] {
        let mut pins = [0u8; DATA_LINES + 4];
        pins[..DATA_LINES].copy_from_slice(&self.data_pins());
        pins[DATA_LINES..].copy_from_slice(&self.control_pins());
        pins
    }

    /// Checks pin assignment and pixel clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        PinSet::new().claim_all(&self.pins())?;

        if !(PCLK_FREQ_MIN..=PCLK_FREQ_MAX).contains(&self.freq_write) {
            return Err(ConfigError::PixelClockOutOfRange(self.freq_write));
        }
        Ok(())
    }

    /// Converts the porch/pulse notation into LCD_CAM frame timing for the
    /// visible area of `panel`.
    pub fn frame_timing(&self, panel: &PanelConfig) -> FrameTiming {
        let hsync_width = usize::from(self.hsync_pulse_width);
        let vsync_width = usize::from(self.vsync_pulse_width);
        let horizontal_blank_front_porch = hsync_width + usize::from(self.hsync_back_porch);
        let vertical_blank_front_porch = vsync_width + usize::from(self.vsync_back_porch);
        let horizontal_active_width = usize::from(panel.panel_width);
        let vertical_active_height = usize::from(panel.panel_height);

        FrameTiming {
            horizontal_total_width: horizontal_blank_front_porch
                + horizontal_active_width
                + usize::from(self.hsync_front_porch),
            horizontal_blank_front_porch,
            horizontal_active_width,
            vertical_total_height: vertical_blank_front_porch
                + vertical_active_height
                + usize::from(self.vsync_front_porch),
            vertical_blank_front_porch,
            vertical_active_height,
            vsync_width,
            hsync_width,
            hsync_position: 0,
        }
    }
}

/// Frame timing in the layout of the LCD_CAM DPI registers.
///
/// `*_blank_front_porch` is the blanking before active data and includes the
/// sync pulse, which is how the peripheral counts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameTiming {
    pub horizontal_total_width: usize,
    pub horizontal_blank_front_porch: usize,
    pub horizontal_active_width: usize,
    pub vertical_total_height: usize,
    pub vertical_blank_front_porch: usize,
    pub vertical_active_height: usize,
    pub vsync_width: usize,
    pub hsync_width: usize,
    pub hsync_position: usize,
}

impl FrameTiming {
    /// Checks that every value fits its register.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sync_ok = |width: usize| (1..=SYNC_WIDTH_MAX).contains(&width);

        if self.horizontal_total_width > HORIZONTAL_TOTAL_MAX
            || self.horizontal_blank_front_porch > HORIZONTAL_FRONT_MAX
            || self.vertical_total_height > VERTICAL_TOTAL_MAX
            || self.vertical_blank_front_porch > VERTICAL_FRONT_MAX
            || !sync_ok(self.hsync_width)
            || !sync_ok(self.vsync_width)
            || self.hsync_width > self.horizontal_blank_front_porch
            || self.vsync_width > self.vertical_blank_front_porch
        {
            return Err(ConfigError::TimingOutOfRange);
        }
        Ok(())
    }

    /// Pixel clocks per frame
    pub fn clocks_per_frame(&self) -> u64 {
        self.horizontal_total_width as u64 * self.vertical_total_height as u64
    }

    /// Frame rate in millihertz for the given pixel clock.
    pub fn refresh_millihertz(&self, pclk_hz: u32) -> u64 {
        match self.clocks_per_frame() {
            0 => 0,
            clocks => u64::from(pclk_hz) * 1000 / clocks,
        }
    }
}

/// The RGB bus driver slot of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bus {
    config: BusConfig,
}

impl Bus {
    pub fn new(config: BusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }
}
