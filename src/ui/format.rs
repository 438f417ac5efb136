//! Text formatting for the watchface regions
//!
//! Every formatter renders into a fixed-size buffer and fails with
//! [`Error::FormatOverflow`] instead of truncating.

use core::fmt;

use chrono::{Datelike, Timelike};
use heapless::String;

use crate::{battery::BatteryState, system::time::ClockConvention, Error};

/// `HH:MM`
pub const TIME_LEN: usize = 5;
/// `YYYY-MM-DD`
pub const DATE_LEN: usize = 10;
/// `u64::MAX` has 20 digits, grouped into 7 groups
pub const COUNTER_LEN: usize = 26;
/// `255% charged`
pub const BATTERY_LEN: usize = 12;

/// Separator inserted between digit groups
pub const GROUP_SEPARATOR: u8 = b',';

/// Digits of `u64::MAX`
const MAX_DIGITS: usize = 20;

pub type TimeText = String<TIME_LEN>;
pub type DateText = String<DATE_LEN>;
pub type CounterText = String<COUNTER_LEN>;
pub type BatteryText = String<BATTERY_LEN>;

/// Render `args` into a bounded string.
fn show<const N: usize>(args: fmt::Arguments) -> Result<String<N>, Error> {
    let mut buf = [0u8; N];
    let text = format_no_std::show(&mut buf, args).map_err(|_| Error::FormatOverflow)?;
    String::try_from(text).map_err(|_| Error::FormatOverflow)
}

/// Clock text `HH:MM` for the given local time.
///
/// The 12 hour convention renders hours 01-12 without an AM/PM marker.
pub fn format_clock<T: Timelike>(time: &T, convention: ClockConvention) -> Result<TimeText, Error> {
    let hour = match convention {
        ClockConvention::TwentyFourHour => time.hour(),
        ClockConvention::TwelveHour => time.hour12().1,
    };
    show(format_args!("{:02}:{:02}", hour, time.minute()))
}

/// ISO calendar date `YYYY-MM-DD` for the given local date.
pub fn format_date<D: Datelike>(date: &D) -> Result<DateText, Error> {
    show(format_args!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    ))
}

/// Battery status text, `charging` or `<percentage>% charged`.
pub fn format_battery(state: BatteryState) -> Result<BatteryText, Error> {
    if state.charging {
        return show(format_args!("charging"));
    }
    if state.percentage > 100 {
        warn!("Battery reported {}%", state.percentage);
    }
    show(format_args!("{}% charged", state.percentage))
}

/// Insert a separator every three digits, counted from the right.
///
/// The first group holds `(len - 1) % 3 + 1` digits, every following group
/// exactly three. Returns the grouped text written to the start of `out`.
pub fn group_digits<'a>(digits: &[u8], out: &'a mut [u8]) -> Result<&'a str, Error> {
    let len = digits.len();
    let mut written = 0;
    let mut push = |byte: u8| -> Result<(), Error> {
        *out.get_mut(written).ok_or(Error::FormatOverflow)? = byte;
        written += 1;
        Ok(())
    };

    for (i, &digit) in digits.iter().enumerate() {
        if !digit.is_ascii_digit() {
            return Err(Error::InvalidDigit);
        }
        if i > 0 && (len - i) % 3 == 0 {
            push(GROUP_SEPARATOR)?;
        }
        push(digit)?;
    }

    core::str::from_utf8(&out[..written]).map_err(|_| Error::InvalidDigit)
}

/// Decimal rendering of `value` with grouped digits, e.g. `1,234,567,890`.
pub fn format_grouped(value: u64) -> Result<CounterText, Error> {
    let mut digits = [0u8; MAX_DIGITS];
    let digits = format_no_std::show(&mut digits, format_args!("{}", value))
        .map_err(|_| Error::FormatOverflow)?;

    let mut grouped = [0u8; COUNTER_LEN];
    let text = group_digits(digits.as_bytes(), &mut grouped)?;
    String::try_from(text).map_err(|_| Error::FormatOverflow)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn grouped(value: u64) -> CounterText {
        format_grouped(value).unwrap()
    }

    /// Values around every power of ten plus a few irregular ones.
    fn sample_values() -> impl Iterator<Item = u64> {
        let edges = (0..20u32).flat_map(|exp| {
            let p = 10u64.pow(exp);
            [p - 1, p, p + 1]
        });
        edges.chain([42, 1_234_567_890, 9_876_543_210_123, u64::MAX - 1, u64::MAX])
    }

    #[test]
    fn grouped_reference_values() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(5), "5");
        assert_eq!(grouped(42), "42");
        assert_eq!(grouped(123), "123");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(1234), "1,234");
        assert_eq!(grouped(123_456), "123,456");
        assert_eq!(grouped(1_234_567_890), "1,234,567,890");
        assert_eq!(grouped(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn grouped_strips_back_to_value() {
        for value in sample_values() {
            let text = grouped(value);
            assert!(!text.starts_with(','), "{text}");
            assert!(!text.ends_with(','), "{text}");

            let digits: std::string::String = text.chars().filter(|c| *c != ',').collect();
            assert_eq!(digits.parse::<u64>().unwrap(), value);
        }
    }

    #[test]
    fn grouped_group_sizes() {
        for value in sample_values() {
            let text = grouped(value);
            let mut groups = text.split(',');
            let first = groups.next().unwrap();
            assert!((1..=3).contains(&first.len()), "{text}");
            assert!(groups.all(|g| g.len() == 3), "{text}");
        }
    }

    #[test]
    fn group_digits_fails_when_buffer_is_short() {
        let mut out = [0u8; 12];
        assert_eq!(
            group_digits(b"1234567890", &mut out),
            Err(Error::FormatOverflow)
        );

        let mut out = [0u8; 13];
        assert_eq!(group_digits(b"1234567890", &mut out), Ok("1,234,567,890"));
    }

    #[test]
    fn group_digits_rejects_non_digits() {
        let mut out = [0u8; 8];
        assert_eq!(group_digits(b"12a4", &mut out), Err(Error::InvalidDigit));
        assert_eq!(group_digits(b"-12", &mut out), Err(Error::InvalidDigit));
    }

    #[test]
    fn group_digits_empty_input() {
        let mut out = [0u8; 4];
        assert_eq!(group_digits(b"", &mut out), Ok(""));
    }

    #[test]
    fn clock_twenty_four_hour() {
        let convention = ClockConvention::TwentyFourHour;
        assert_eq!(format_clock(&hm(0, 0), convention).unwrap(), "00:00");
        assert_eq!(format_clock(&hm(9, 5), convention).unwrap(), "09:05");
        assert_eq!(format_clock(&hm(12, 0), convention).unwrap(), "12:00");
        assert_eq!(format_clock(&hm(23, 59), convention).unwrap(), "23:59");
    }

    #[test]
    fn clock_twelve_hour_has_no_meridiem() {
        let convention = ClockConvention::TwelveHour;
        assert_eq!(format_clock(&hm(0, 0), convention).unwrap(), "12:00");
        assert_eq!(format_clock(&hm(1, 7), convention).unwrap(), "01:07");
        assert_eq!(format_clock(&hm(12, 30), convention).unwrap(), "12:30");
        assert_eq!(format_clock(&hm(13, 5), convention).unwrap(), "01:05");
        assert_eq!(format_clock(&hm(23, 59), convention).unwrap(), "11:59");
    }

    #[test]
    fn clock_shape_for_every_minute() {
        for hour in 0..24 {
            for minute in 0..60 {
                let time = hm(hour, minute);

                let text = format_clock(&time, ClockConvention::TwentyFourHour).unwrap();
                assert_eq!(text.len(), 5);
                assert_eq!(&text[2..3], ":");
                assert_eq!(text[..2].parse::<u32>().unwrap(), hour);
                assert_eq!(text[3..].parse::<u32>().unwrap(), minute);

                let text = format_clock(&time, ClockConvention::TwelveHour).unwrap();
                let (h, m) = text.split_once(':').unwrap();
                assert!((1..=12).contains(&h.parse::<u32>().unwrap()), "{text}");
                assert_eq!(m.len(), 2);
                assert_eq!(m.parse::<u32>().unwrap(), minute);
            }
        }
    }

    #[test]
    fn date_is_iso() {
        let date = NaiveDate::from_ymd_opt(2009, 2, 13).unwrap();
        assert_eq!(format_date(&date).unwrap(), "2009-02-13");

        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(format_date(&date).unwrap(), "1970-01-01");

        let date = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert_eq!(format_date(&date).unwrap().len(), 10);
    }

    #[test]
    fn date_beyond_year_9999_overflows() {
        let date = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert_eq!(format_date(&date), Err(Error::FormatOverflow));
    }

    #[test]
    fn battery_text() {
        assert_eq!(
            format_battery(BatteryState::new(100, false)).unwrap(),
            "100% charged"
        );
        assert_eq!(format_battery(BatteryState::new(50, true)).unwrap(), "charging");
        assert_eq!(format_battery(BatteryState::new(0, false)).unwrap(), "0% charged");
        assert_eq!(format_battery(BatteryState::new(7, false)).unwrap(), "7% charged");
    }

    #[test]
    fn battery_out_of_range_is_rendered_as_is() {
        assert_eq!(
            format_battery(BatteryState::new(255, false)).unwrap(),
            "255% charged"
        );
        assert_eq!(format_battery(BatteryState::new(180, true)).unwrap(), "charging");
    }
}
