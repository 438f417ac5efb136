//! Battery status
//!
//! Conversion based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use crate::Error;

/// Charge state reported by the battery service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// Battery capacity in percent, expected in 0-100 but not validated
    pub percentage: u8,
    /// Charging state
    pub charging: bool,
}

impl BatteryState {
    pub fn new(percentage: u8, charging: bool) -> Self {
        Self {
            percentage,
            charging,
        }
    }
}

/// Source of the current battery state.
pub trait BatteryService {
    fn battery_state(&mut self) -> Result<BatteryState, Error>;
}

/// Convert a 12 bit SAADC sample of the battery voltage divider into millivolts.
pub fn millivolts_from_adc(raw: i16) -> Result<u16, Error> {
    match raw {
        0..=4095 => {
            // Multiply by 2 * 1000 for mV and divide by (2 ^ 12 / 3.3V reference).
            // Use u32 during calculation to prevent overflow
            Ok((raw as u32 * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Estimate the battery capacity in percent from its voltage.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    // Fixed data points with linear interpolation in between
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}
