pub(super) mod backlight;
pub(super) mod battery;
pub(super) mod board;
pub(super) mod display;
