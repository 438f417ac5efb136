//! PineTime watchface
//!
//! Renders the current time, date, a digit-grouped Unix epoch counter and the
//! battery status onto the watch display. The crate is `no_std`; everything
//! the hardware provides (clock, battery, display) is reached through the
//! traits in [`system::time`], [`battery`] and [`ui`], so the whole refresh
//! path runs on a development machine as well.

#![cfg_attr(not(test), no_std)]

// This must go first so the logging macros are visible to the modules below.
mod fmt;

pub mod battery;
pub mod error;
pub mod system;
pub mod ui;

pub use error::Error;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;
