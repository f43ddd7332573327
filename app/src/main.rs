#![no_std]
#![no_main]

use crowpanel_bsp::board::crowpanel_7;
use embassy_executor::Spawner;
use embassy_time::Timer;
use embedded_hal_bus::i2c::AtomicDevice;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_hal_embassy::main;
use hardware::{
    initialize_backlight, initialize_display, initialize_touch_bus, start_color_bars, RgbPins,
};
use log::{info, warn};

mod hardware;

esp_bootloader_esp_idf::esp_app_desc!();

/// Backlight brightness after boot (0..=255)
const BACKLIGHT_BRIGHTNESS: u8 = u8::MAX;

/// Interval between touch controller presence checks
const TOUCH_CHECK_INTERVAL_SECS: u64 = 2;

#[main]
async fn main(_spawner: Spawner) {
    // Initialize peripherals
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::_240MHz));

    esp_println::logger::init_logger_from_env();

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);
    info!("Embassy initialized!");

    // Build and check the board description before touching any pin
    let device = crowpanel_7();
    device.validate().expect("Invalid board configuration");
    let panel = device.panel();
    info!("Board configuration valid");

    let pins = RgbPins {
        b0: peripherals.GPIO15,
        b1: peripherals.GPIO7,
        b2: peripherals.GPIO6,
        b3: peripherals.GPIO5,
        b4: peripherals.GPIO4,
        g0: peripherals.GPIO9,
        g1: peripherals.GPIO46,
        g2: peripherals.GPIO3,
        g3: peripherals.GPIO8,
        g4: peripherals.GPIO16,
        g5: peripherals.GPIO1,
        r0: peripherals.GPIO14,
        r1: peripherals.GPIO21,
        r2: peripherals.GPIO47,
        r3: peripherals.GPIO48,
        r4: peripherals.GPIO45,
        de: peripherals.GPIO41,
        vsync: peripherals.GPIO40,
        hsync: peripherals.GPIO39,
        pclk: peripherals.GPIO0,
    };
    let dpi = initialize_display(panel, peripherals.LCD_CAM, peripherals.DMA_CH0, pins);

    // The transfer runs as long as it is alive
    let _frame = start_color_bars(dpi).expect("Failed to start RGB transfer");
    info!("RGB transfer running");

    let _backlight = panel.light().map(|light| {
        let mut backlight =
            initialize_backlight(light.config(), peripherals.LEDC, peripherals.GPIO2);
        light
            .set_brightness(&mut backlight, BACKLIGHT_BRIGHTNESS)
            .expect("Failed to set backlight brightness");
        info!("Backlight on");
        backlight
    });

    let Some(touch) = panel.touch() else {
        info!("No touch controller on this panel");
        loop {
            Timer::after_secs(TOUCH_CHECK_INTERVAL_SECS).await;
        }
    };

    let touch_bus = initialize_touch_bus(
        touch.config(),
        peripherals.I2C1,
        peripherals.GPIO19,
        peripherals.GPIO20,
    );

    let mut present = false;
    loop {
        let mut i2c = AtomicDevice::new(touch_bus);
        let found = touch.is_present(&mut i2c);
        if found != present {
            if found {
                info!(
                    "Touch controller detected at 0x{:02X}",
                    u8::from(touch.config().i2c_addr)
                );
            } else {
                warn!(
                    "Touch controller not responding at 0x{:02X}",
                    u8::from(touch.config().i2c_addr)
                );
            }
            present = found;
        }
        Timer::after_secs(TOUCH_CHECK_INTERVAL_SECS).await;
    }
}
