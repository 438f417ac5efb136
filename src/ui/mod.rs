//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use crate::Error;

pub mod canvas;
pub mod format;
pub mod watchface;

pub use watchface::{FormattedStrings, Watchface, WatchfaceState};

/// Display area showing one formatted string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    Time,
    Date,
    Counter,
    Battery,
}

impl Region {
    /// All regions, top to bottom.
    pub const ALL: [Region; 4] = [Region::Time, Region::Date, Region::Counter, Region::Battery];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of enabled regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSet(u8);

impl RegionSet {
    pub const EMPTY: Self = Self(0);
    /// Time, date, counter and battery
    pub const FULL: Self = Self(
        Region::Time.bit() | Region::Date.bit() | Region::Counter.bit() | Region::Battery.bit(),
    );
    /// Time and counter only
    pub const COMPACT: Self = Self(Region::Time.bit() | Region::Counter.bit());

    /// Set with `region` added.
    pub const fn with(self, region: Region) -> Self {
        Self(self.0 | region.bit())
    }

    /// Set with `region` removed.
    pub const fn without(self, region: Region) -> Self {
        Self(self.0 & !region.bit())
    }

    pub const fn contains(self, region: Region) -> bool {
        self.0 & region.bit() != 0
    }

    /// Enabled regions, top to bottom.
    pub fn iter(self) -> impl Iterator<Item = Region> {
        Region::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

/// Output collaborator displaying the text of a region.
pub trait RenderSink {
    fn render(&mut self, region: Region, text: &str) -> Result<(), Error>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn render(&mut self, region: Region, text: &str) -> Result<(), Error> {
        (**self).render(region, text)
    }
}
