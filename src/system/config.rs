//! Watchface configuration

use chrono::{FixedOffset, Offset, Utc};

use super::time::ClockConvention;
use crate::ui::{canvas::Shape, RegionSet};

/// Highest backlight level supported by the hardware
pub const MAX_BACKLIGHT_LEVEL: u8 = 7;

/// User facing settings of the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchfaceConfig {
    /// Regions drawn on the screen
    pub regions: RegionSet,
    /// Display shape, used for the layout insets
    pub shape: Shape,
    /// Local time offset east of UTC in seconds
    pub utc_offset_secs: i32,
    /// 12h or 24h clock
    pub convention: ClockConvention,
    /// Backlight level (0-7)
    pub backlight_level: u8,
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self {
            regions: RegionSet::FULL,
            shape: Shape::Rectangular,
            utc_offset_secs: 0,
            convention: ClockConvention::TwentyFourHour,
            backlight_level: 2,
        }
    }
}

impl WatchfaceConfig {
    /// Local calendar for the configured offset.
    ///
    /// Offsets of a day or more are not representable and fall back to UTC.
    pub fn calendar(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| {
            warn!("Invalid UTC offset {}, using UTC", self.utc_offset_secs);
            Utc.fix()
        })
    }

    /// Backlight level clamped to the supported range.
    pub fn backlight_level(&self) -> u8 {
        self.backlight_level.min(MAX_BACKLIGHT_LEVEL)
    }
}
