//! Backlight hardware initialization module
//!
//! This module binds the backlight description to an LEDC low speed channel.

use crowpanel_bsp::light::{LightConfig, PWM_DUTY_BITS};
use embedded_hal::pwm::SetDutyCycle;
use esp_hal::gpio::Pin;
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::{GPIO2, LEDC};
use esp_hal::time::Rate;
use log::info;
use static_cell::StaticCell;

/// Type alias for the LEDC channel driving the backlight
pub type Backlight = channel::Channel<'static, LowSpeed>;

// Frequency limits in the library assume this resolution
const _: () = assert!(PWM_DUTY_BITS == 10);

fn channel_number(index: u8) -> Option<channel::Number> {
    match index {
        0 => Some(channel::Number::Channel0),
        1 => Some(channel::Number::Channel1),
        2 => Some(channel::Number::Channel2),
        3 => Some(channel::Number::Channel3),
        4 => Some(channel::Number::Channel4),
        5 => Some(channel::Number::Channel5),
        6 => Some(channel::Number::Channel6),
        7 => Some(channel::Number::Channel7),
        _ => None,
    }
}

/// Initializes the LEDC timer and channel for the backlight.
///
/// The channel starts switched off; use
/// [`crowpanel_bsp::light::Light::set_brightness`] to turn it on.
///
/// # Panics
///
/// Panics if the pin differs from the description or LEDC rejects the
/// frequency.
pub fn initialize_backlight(
    light: &LightConfig,
    ledc: LEDC<'static>,
    pin: GPIO2<'static>,
) -> Backlight {
    assert_eq!(
        pin.number(),
        light.pin_bl,
        "backlight pin does not match the description"
    );
    let number = channel_number(light.pwm_channel).expect("LEDC channel out of range");

    static LEDC_DRIVER: StaticCell<Ledc<'static>> = StaticCell::new();
    let ledc = LEDC_DRIVER.init(Ledc::new(ledc));
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    static LEDC_TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();
    let lstimer = LEDC_TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));
    lstimer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty10Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(light.freq),
        })
        .expect("Failed to configure backlight timer");
    let lstimer: &'static timer::Timer<'static, LowSpeed> = lstimer;

    let mut channel = ledc.channel(number, pin);
    channel
        .configure(channel::config::Config {
            timer: lstimer,
            duty_pct: 0,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .expect("Failed to configure backlight channel");

    info!(
        "Backlight: GPIO{} on LEDC channel {} at {}Hz, max duty {}",
        light.pin_bl,
        light.pwm_channel,
        light.freq,
        channel.max_duty_cycle()
    );

    channel
}
