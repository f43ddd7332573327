//! RGB panel hardware initialization module
//!
//! This module configures the LCD_CAM peripheral in DPI mode from the panel
//! description and streams a test pattern to it.

use crowpanel_bsp::board::LINE_BYTES;
use crowpanel_bsp::panel::{Panel, BYTES_PER_PIXEL};
use esp_hal::dma::{DmaError, DmaLoopBuf};
use esp_hal::dma_loop_buffer;
use esp_hal::gpio::{Level, Pin};
use esp_hal::lcd_cam::lcd::dpi::{Config as DpiConfig, Dpi, DpiTransfer, Format, FrameTiming};
use esp_hal::lcd_cam::lcd::{ClockMode, Phase, Polarity};
use esp_hal::lcd_cam::LcdCam;
use esp_hal::peripherals::{
    DMA_CH0, GPIO0, GPIO1, GPIO14, GPIO15, GPIO16, GPIO21, GPIO3, GPIO39, GPIO4, GPIO40, GPIO41,
    GPIO45, GPIO46, GPIO47, GPIO48, GPIO5, GPIO6, GPIO7, GPIO8, GPIO9, LCD_CAM,
};
use esp_hal::time::Rate;
use esp_hal::Blocking;
use log::info;

/// RGB565 test pattern, left to right
const COLOR_BARS: [u16; 8] = [
    0xFFFF, // white
    0xFFE0, // yellow
    0x07FF, // cyan
    0x07E0, // green
    0xF81F, // magenta
    0xF800, // red
    0x001F, // blue
    0x0000, // black
];

/// Type alias for the DPI driver of the panel
pub type RgbDisplay = Dpi<'static, Blocking>;

/// Running transfer that keeps repeating one line
pub type LineTransfer = DpiTransfer<'static, DmaLoopBuf, Blocking>;

/// Pins of the RGB bus, named after the colour bit they carry
pub struct RgbPins {
    pub b0: GPIO15<'static>,
    pub b1: GPIO7<'static>,
    pub b2: GPIO6<'static>,
    pub b3: GPIO5<'static>,
    pub b4: GPIO4<'static>,
    pub g0: GPIO9<'static>,
    pub g1: GPIO46<'static>,
    pub g2: GPIO3<'static>,
    pub g3: GPIO8<'static>,
    pub g4: GPIO16<'static>,
    pub g5: GPIO1<'static>,
    pub r0: GPIO14<'static>,
    pub r1: GPIO21<'static>,
    pub r2: GPIO47<'static>,
    pub r3: GPIO48<'static>,
    pub r4: GPIO45<'static>,
    pub de: GPIO41<'static>,
    pub vsync: GPIO40<'static>,
    pub hsync: GPIO39<'static>,
    pub pclk: GPIO0<'static>,
}

impl RgbPins {
    fn numbers(&self) -> [u8; 20] {
        [
            self.b0.number(),
            self.b1.number(),
            self.b2.number(),
            self.b3.number(),
            self.b4.number(),
            self.g0.number(),
            self.g1.number(),
            self.g2.number(),
            self.g3.number(),
            self.g4.number(),
            self.g5.number(),
            self.r0.number(),
            self.r1.number(),
            self.r2.number(),
            self.r3.number(),
            self.r4.number(),
            self.de.number(),
            self.vsync.number(),
            self.hsync.number(),
            self.pclk.number(),
        ]
    }
}

/// Initializes the LCD_CAM DPI driver for `panel`.
///
/// # Arguments
///
/// * `panel` - Panel description carrying bus timing and geometry
/// * `lcd_cam` - LCD_CAM peripheral instance
/// * `dma` - DMA channel 0 for pixel transfers
/// * `pins` - GPIOs wired to the panel
///
/// # Panics
///
/// Panics if the GPIOs differ from the bus description, the visible width
/// does not match the static line buffer, or the pixel clock cannot be
/// generated.
pub fn initialize_display(
    panel: &Panel,
    lcd_cam: LCD_CAM<'static>,
    dma: DMA_CH0<'static>,
    pins: RgbPins,
) -> RgbDisplay {
    let bus = panel.bus().config();
    assert_eq!(
        pins.numbers(),
        bus.pins(),
        "RGB pins do not match the bus description"
    );
    assert_eq!(
        panel.config().line_bytes(),
        LINE_BYTES,
        "panel width does not match the line buffer"
    );

    let timing = panel.frame_timing();
    info!(
        "RGB bus: {}x{} @ {}Hz pclk, {}mHz refresh",
        timing.horizontal_active_width,
        timing.vertical_active_height,
        bus.freq_write,
        timing.refresh_millihertz(bus.freq_write)
    );

    let config = DpiConfig::default()
        .with_frequency(Rate::from_hz(bus.freq_write))
        .with_clock_mode(ClockMode {
            polarity: if bus.pclk_idle_high {
                Polarity::IdleHigh
            } else {
                Polarity::IdleLow
            },
            phase: if bus.pclk_active_neg {
                Phase::ShiftHigh
            } else {
                Phase::ShiftLow
            },
        })
        .with_format(Format {
            enable_2byte_mode: true,
            ..Default::default()
        })
        .with_timing(FrameTiming {
            horizontal_total_width: timing.horizontal_total_width,
            horizontal_blank_front_porch: timing.horizontal_blank_front_porch,
            horizontal_active_width: timing.horizontal_active_width,
            vertical_total_height: timing.vertical_total_height,
            vertical_blank_front_porch: timing.vertical_blank_front_porch,
            vertical_active_height: timing.vertical_active_height,
            vsync_width: timing.vsync_width,
            hsync_width: timing.hsync_width,
            hsync_position: timing.hsync_position,
        })
        .with_vsync_idle_level(Level::from(bus.vsync_polarity))
        .with_hsync_idle_level(Level::from(bus.hsync_polarity))
        .with_de_idle_level(Level::from(bus.de_idle_high))
        .with_disable_black_region(false);

    let lcd_cam = LcdCam::new(lcd_cam);

    Dpi::new(lcd_cam.lcd, dma, config)
        .expect("Failed to configure the RGB bus")
        .with_de(pins.de)
        .with_vsync(pins.vsync)
        .with_hsync(pins.hsync)
        .with_pclk(pins.pclk)
        .with_data0(pins.b0)
        .with_data1(pins.b1)
        .with_data2(pins.b2)
        .with_data3(pins.b3)
        .with_data4(pins.b4)
        .with_data5(pins.g0)
        .with_data6(pins.g1)
        .with_data7(pins.g2)
        .with_data8(pins.g3)
        .with_data9(pins.g4)
        .with_data10(pins.g5)
        .with_data11(pins.r0)
        .with_data12(pins.r1)
        .with_data13(pins.r2)
        .with_data14(pins.r3)
        .with_data15(pins.r4)
}

/// Streams vertical colour bars. Every line is the same, so a single line
/// looped by DMA fills the whole frame.
pub fn start_color_bars(dpi: RgbDisplay) -> Result<LineTransfer, DmaError> {
    let mut line = dma_loop_buffer!(LINE_BYTES);

    let bar_width = LINE_BYTES / BYTES_PER_PIXEL / COLOR_BARS.len();
    for (x, pixel) in line.chunks_mut(BYTES_PER_PIXEL).enumerate() {
        let color = COLOR_BARS[(x / bar_width).min(COLOR_BARS.len() - 1)];
        pixel.copy_from_slice(&color.to_le_bytes());
    }

    dpi.send(true, line).map_err(|e| e.0)
}
