//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::gpio::{AnyPin, Output};
use pinetime_watchface::system::config::MAX_BACKLIGHT_LEVEL;

/// Control the backlight.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Through combinations of these pins, 7 brightness levels (+ off) can be
/// configured.
pub struct Backlight<'a> {
    low: Output<'a, AnyPin>,
    mid: Output<'a, AnyPin>,
    high: Output<'a, AnyPin>,
}

impl<'a> Backlight<'a> {
    /// Initialize the backlight with the specified level (0–7).
    pub fn init(
        low: Output<'a, AnyPin>,
        mid: Output<'a, AnyPin>,
        high: Output<'a, AnyPin>,
        level: u8,
    ) -> Self {
        let mut backlight = Self { low, mid, high };
        backlight.set(level);
        backlight
    }

    /// Set the brightness level. Higher values than 7 are clamped.
    pub fn set(&mut self, level: u8) {
        let level = level.min(MAX_BACKLIGHT_LEVEL);
        defmt::debug!("Setting backlight brightness to {}", level);
        Self::drive(&mut self.low, level & 0x01 > 0);
        Self::drive(&mut self.mid, level & 0x02 > 0);
        Self::drive(&mut self.high, level & 0x04 > 0);
    }

    fn drive(pin: &mut Output<'a, AnyPin>, on: bool) {
        if on {
            pin.set_low();
        } else {
            pin.set_high();
        }
    }
}
