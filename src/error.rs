//! Error type shared by the formatters, the collaborators and the refresh loop

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A formatted string does not fit its fixed buffer.
    FormatOverflow,
    /// Digit grouping was handed something other than an ASCII digit.
    InvalidDigit,
    /// The calendar cannot represent the timestamp.
    TimestampOutOfRange,
    /// Clock or battery service is not ready yet.
    HostUnavailable,
    /// ADC sample outside of the 12-bit range.
    InvalidMeasurement,
    /// The render sink failed to draw a region.
    Render,
    /// An event arrived before the watchface was started.
    NotStarted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::FormatOverflow => "formatted text exceeds its buffer",
            Error::InvalidDigit => "non-digit byte in digit sequence",
            Error::TimestampOutOfRange => "timestamp outside of calendar range",
            Error::HostUnavailable => "host service unavailable",
            Error::InvalidMeasurement => "invalid ADC measurement",
            Error::Render => "failed to draw region",
            Error::NotStarted => "watchface not started",
        })
    }
}
