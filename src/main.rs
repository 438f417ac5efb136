#![no_std]
#![no_main]

mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Timer};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight::Backlight, battery::Battery, board::board_config, display::Lcd};
use pinetime_watchface::{
    battery::{BatteryService, BatteryState},
    system::{
        config::WatchfaceConfig,
        time::{secs_until_next_minute, ClockConvention, ClockSource, TimeReference},
    },
    ui::{canvas::Canvas, Watchface},
    Error, Timestamp,
};

// Others
use chrono::FixedOffset;

// Include build time epoch
include!(concat!(env!("OUT_DIR"), "/build_epoch.rs"));
const TIMEZONE: i32 = 1 * 3_600;

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryState> = Signal::new();

type Face = Watchface<Canvas<Lcd<'static, SPI2>>, FixedOffset>;

/// Clock and battery state as seen by the watchface
struct Device {
    /// Wall clock at boot
    reference: TimeReference,
    convention: ClockConvention,
    /// Last sampled battery state
    battery: Option<BatteryState>,
}

impl ClockSource for Device {
    fn now(&mut self) -> Result<Timestamp, Error> {
        Ok(self.reference.now(Instant::now().as_secs()))
    }

    fn clock_convention(&mut self) -> Result<ClockConvention, Error> {
        Ok(self.convention)
    }
}

impl BatteryService for Device {
    fn battery_state(&mut self) -> Result<BatteryState, Error> {
        self.battery.ok_or(Error::HostUnavailable)
    }
}

fn config() -> WatchfaceConfig {
    WatchfaceConfig {
        utc_offset_secs: TIMEZONE,
        ..Default::default()
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery<'static>, mut last: Option<BatteryState>) {
    loop {
        match battery.state().await {
            Ok(state) if last != Some(state) => {
                defmt::info!("Battery status updated: {}", state);
                last = Some(state);
                BATTERY_STATUS.signal(state);
            }
            Ok(_) => {}
            Err(e) => defmt::warn!("Battery measurement failed: {}", e),
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Redraw the watchface on every minute boundary and battery change.
///
/// Holds the backlight so its pins stay driven while the face is shown.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut face: Face, mut device: Device, _backlight: Backlight<'static>) {
    if let Err(e) = face.start(&mut device) {
        defmt::warn!("First refresh failed: {}", e);
    }

    loop {
        let now = device.reference.now(Instant::now().as_secs());
        let tick = Timer::after(Duration::from_secs(secs_until_next_minute(now)));

        match select(tick, BATTERY_STATUS.wait()).await {
            Either::First(()) => {
                if let Err(e) = face.on_tick(&mut device) {
                    defmt::warn!("Tick refresh failed: {}", e);
                }
            }
            Either::Second(state) => {
                device.battery = Some(state);
                if let Err(e) = face.on_battery_change(state) {
                    defmt::warn!("Battery refresh failed: {}", e);
                }
            }
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(board_config());
    defmt::info!("Initializing");
    let config = config();

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    let backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        config.backlight_level(),
    );

    // Initialize Battery
    let mut battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None));
    let battery_state = battery.state().await.ok();

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let Some(lcd) = peripherals::display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ) else {
        defmt::panic!("Display initialization failed");
    };
    let mut canvas = Canvas::new(lcd, config.shape);
    if let Err(e) = canvas.clear() {
        defmt::warn!("Clearing display failed: {}", e);
    }

    let face = Watchface::new(canvas, config.calendar(), config.regions);
    let device = Device {
        reference: TimeReference::new(BUILD_EPOCH, Instant::now().as_secs()),
        convention: config.convention,
        battery: battery_state,
    };

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(update_battery_status(battery, battery_state)));
    unwrap!(spawner.spawn(update_lcd(face, device, backlight)));
}
