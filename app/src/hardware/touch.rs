//! Touch bus hardware initialization module
//!
//! This module brings up the I2C bus the GT911 sits on. The bus is wrapped in
//! an `AtomicCell` so the touch driver and other devices can share it.

use crowpanel_bsp::touch::{I2cPort, TouchConfig};
use embedded_hal_bus::util::AtomicCell;
use esp_hal::gpio::Pin;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::peripherals::{GPIO19, GPIO20, I2C1};
use esp_hal::time::Rate;
use esp_hal::Blocking;
use log::info;
use static_cell::StaticCell;

/// Type alias for the shared touch I2C bus
pub type TouchBus = AtomicCell<I2c<'static, Blocking>>;

/// Initializes the touch I2C bus.
///
/// # Arguments
///
/// * `touch` - Touch description with port, pins and clock
/// * `i2c` - I2C1 peripheral instance
/// * `sda` - GPIO pin for I2C data
/// * `scl` - GPIO pin for I2C clock
///
/// # Panics
///
/// Panics if the peripheral or pins differ from the description.
pub fn initialize_touch_bus(
    touch: &TouchConfig,
    i2c: I2C1<'static>,
    sda: GPIO19<'static>,
    scl: GPIO20<'static>,
) -> &'static TouchBus {
    assert_eq!(touch.i2c_port, I2cPort::I2c1, "touch is not on I2C1");
    assert_eq!(
        [sda.number(), scl.number()],
        touch.pins(),
        "touch pins do not match the description"
    );

    let i2c = I2c::new(
        i2c,
        I2cConfig::default().with_frequency(Rate::from_hz(touch.freq)),
    )
    .expect("Failed to initialize touch I2C")
    .with_sda(sda)
    .with_scl(scl);

    info!(
        "Touch I2C: {}Hz, shared: {}",
        touch.freq, touch.bus_shared
    );

    static TOUCH_BUS: StaticCell<TouchBus> = StaticCell::new();
    TOUCH_BUS.init(AtomicCell::new(i2c))
}
