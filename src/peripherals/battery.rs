//! Battery measurement on the PineTime

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_watchface::{
    battery::{millivolts_from_adc, percent_from_millivolts, BatteryState},
    Error,
};

/// Battery API
pub struct Battery<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
}

impl<'a> Battery<'a> {
    /// Configure battery settings on boot
    pub fn init(adc: Saadc<'a, 1>, charge_pin: Input<'a, P0_12>) -> Self {
        Self {
            adc,
            pin_charge_indication: charge_pin,
        }
    }

    /// Charging state of the battery
    pub fn is_charging(&self) -> bool {
        self.pin_charge_indication.is_low()
    }

    /// Sample the current battery state.
    pub async fn state(&mut self) -> Result<BatteryState, Error> {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        let voltage = millivolts_from_adc(buf[0])?;
        Ok(BatteryState::new(
            percent_from_millivolts(voltage),
            self.is_charging(),
        ))
    }
}
