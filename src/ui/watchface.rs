//! Watchface refresh loop
//!
//! [`Watchface`] owns the text of every region and pushes it to a
//! [`RenderSink`]. A refresh computes all strings first and only then touches
//! the display, so a cycle failing to format leaves the previous strings on
//! screen. A sink failure stops the cycle at the failing region; the regions
//! drawn before it keep their new text.

use chrono::NaiveDateTime;
use heapless::String;

use super::{
    format::{
        format_battery, format_clock, format_date, format_grouped, BatteryText, CounterText,
        DateText, TimeText,
    },
    Region, RegionSet, RenderSink,
};
use crate::{
    battery::{BatteryService, BatteryState},
    system::time::{ClockConvention, ClockSource, LocalCalendar},
    Error, Timestamp,
};

/// Text for each region. `None` means "leave the region as it is".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedStrings {
    pub time: Option<TimeText>,
    pub date: Option<DateText>,
    pub counter: Option<CounterText>,
    pub battery: Option<BatteryText>,
}

impl FormattedStrings {
    /// Texts shown before the first refresh
    pub fn placeholders(regions: RegionSet) -> Self {
        fn placeholder<const N: usize>(
            regions: RegionSet,
            region: Region,
            text: &str,
        ) -> Option<String<N>> {
            if regions.contains(region) {
                String::try_from(text).ok()
            } else {
                None
            }
        }

        Self {
            time: placeholder(regions, Region::Time, "00:00"),
            date: placeholder(regions, Region::Date, "0000-00-00"),
            counter: placeholder(regions, Region::Counter, "0,000,000,000"),
            battery: placeholder(regions, Region::Battery, "100% charged"),
        }
    }

    /// Format every enabled region.
    ///
    /// `battery` is only used when the battery region is enabled; `None`
    /// leaves the battery text out.
    pub fn compute(
        regions: RegionSet,
        timestamp: Timestamp,
        local: &NaiveDateTime,
        convention: ClockConvention,
        battery: Option<BatteryState>,
    ) -> Result<Self, Error> {
        let mut strings = Self::default();
        if regions.contains(Region::Time) {
            strings.time = Some(format_clock(local, convention)?);
        }
        if regions.contains(Region::Date) {
            strings.date = Some(format_date(local)?);
        }
        if regions.contains(Region::Counter) {
            strings.counter = Some(format_grouped(timestamp)?);
        }
        if regions.contains(Region::Battery) {
            strings.battery = battery.map(format_battery).transpose()?;
        }
        Ok(strings)
    }

    /// Text of `region`, if any.
    pub fn get(&self, region: Region) -> Option<&str> {
        match region {
            Region::Time => self.time.as_deref(),
            Region::Date => self.date.as_deref(),
            Region::Counter => self.counter.as_deref(),
            Region::Battery => self.battery.as_deref(),
        }
    }

    /// Copy the text of `region` from `other`, if it has one.
    fn take_region(&mut self, other: &Self, region: Region) {
        match region {
            Region::Time if other.time.is_some() => self.time.clone_from(&other.time),
            Region::Date if other.date.is_some() => self.date.clone_from(&other.date),
            Region::Counter if other.counter.is_some() => {
                self.counter.clone_from(&other.counter)
            }
            Region::Battery if other.battery.is_some() => {
                self.battery.clone_from(&other.battery)
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchfaceState {
    Uninitialized,
    Displaying,
}

/// Watchface showing time, date, epoch counter and battery status
pub struct Watchface<S, L> {
    /// Display regions
    sink: S,
    /// Local time conversion
    calendar: L,
    /// Enabled regions
    regions: RegionSet,
    /// Currently shown texts
    shown: FormattedStrings,
    state: WatchfaceState,
}

impl<S, L> Watchface<S, L>
where
    S: RenderSink,
    L: LocalCalendar,
{
    pub fn new(sink: S, calendar: L, regions: RegionSet) -> Self {
        Self {
            sink,
            calendar,
            regions,
            shown: FormattedStrings::placeholders(regions),
            state: WatchfaceState::Uninitialized,
        }
    }

    pub fn state(&self) -> WatchfaceState {
        self.state
    }

    pub fn regions(&self) -> RegionSet {
        self.regions
    }

    /// Texts currently on screen
    pub fn shown(&self) -> &FormattedStrings {
        &self.shown
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Release the display regions.
    pub fn teardown(self) -> S {
        self.sink
    }

    /// Draw the placeholders and run the first refresh.
    ///
    /// The watchface is displaying afterwards even if drawing the
    /// placeholders or the first refresh failed; the next tick retries.
    pub fn start<H>(&mut self, host: &mut H) -> Result<(), Error>
    where
        H: ClockSource + BatteryService,
    {
        self.state = WatchfaceState::Displaying;
        info!("Watchface started");

        for region in self.regions.iter() {
            if let Some(text) = self.shown.get(region) {
                if let Err(e) = self.sink.render(region, text) {
                    warn!("Placeholders not drawn: {}", e);
                    break;
                }
            }
        }
        self.refresh_regions(host)
    }

    /// Handle the minute tick.
    pub fn on_tick<H>(&mut self, host: &mut H) -> Result<(), Error>
    where
        H: ClockSource + BatteryService,
    {
        self.refresh(host)
    }

    /// Handle a battery change by redrawing only the battery region.
    pub fn on_battery_change(&mut self, battery: BatteryState) -> Result<(), Error> {
        self.ensure_started()?;
        if !self.regions.contains(Region::Battery) {
            return Ok(());
        }
        let text = format_battery(battery).inspect_err(|e| {
            error!("Battery text not updated: {}", e);
        })?;
        self.show(FormattedStrings {
            battery: Some(text),
            ..Default::default()
        })
    }

    /// Recompute and redraw every enabled region.
    pub fn refresh<H>(&mut self, host: &mut H) -> Result<(), Error>
    where
        H: ClockSource + BatteryService,
    {
        self.ensure_started()?;
        self.refresh_regions(host)
    }

    fn refresh_regions<H>(&mut self, host: &mut H) -> Result<(), Error>
    where
        H: ClockSource + BatteryService,
    {
        let next = self.compute(host).inspect_err(|e| match e {
            Error::HostUnavailable => warn!("Clock unavailable, skipping refresh"),
            _ => error!("Refresh aborted: {}", e),
        })?;
        self.show(next)
    }

    fn compute<H>(&self, host: &mut H) -> Result<FormattedStrings, Error>
    where
        H: ClockSource + BatteryService,
    {
        let timestamp = host.now()?;
        let convention = host.clock_convention()?;
        let local = self
            .calendar
            .resolve(timestamp)
            .ok_or(Error::TimestampOutOfRange)?;
        debug!("Refreshing at {}", timestamp);

        let battery = if self.regions.contains(Region::Battery) {
            host.battery_state()
                .inspect_err(|e| warn!("Battery state unavailable: {}", e))
                .ok()
        } else {
            None
        };

        FormattedStrings::compute(self.regions, timestamp, &local, convention, battery)
    }

    /// Push every text in `next` to its region.
    ///
    /// A region counts as shown once the sink accepted it, so a sink failure
    /// leaves `shown` matching what actually reached the screen.
    fn show(&mut self, next: FormattedStrings) -> Result<(), Error> {
        for region in self.regions.iter() {
            if let Some(text) = next.get(region) {
                self.sink.render(region, text).inspect_err(|e| {
                    error!("Drawing stopped at {:?}: {}", region, e);
                })?;
                self.shown.take_region(&next, region);
            }
        }
        Ok(())
    }

    fn ensure_started(&self) -> Result<(), Error> {
        match self.state {
            WatchfaceState::Displaying => Ok(()),
            WatchfaceState::Uninitialized => Err(Error::NotStarted),
        }
    }
}
