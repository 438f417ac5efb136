//! nRF52832 setup for the watchface

use embassy_nrf::config::{Config, Debug, HfclkSource, LfclkSource};

/// Peripheral configuration handed to `embassy_nrf::init`.
///
/// The minute tick runs off RTC1, so the 32.768 kHz crystal drives the low
/// frequency clock; the internal RC oscillator drifts by minutes per day.
/// SPIM and SAADC need the high frequency crystal only while active.
pub(crate) fn board_config() -> Config {
    let mut config = Config::default();
    config.lfclk_source = LfclkSource::ExternalXtal;
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.dcdc.reg1 = true;

    // SWD stays open on development builds only
    config.debug = if cfg!(debug_assertions) {
        Debug::Allowed
    } else {
        Debug::NotConfigured
    };

    config
}
