//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};
use embassy_time::Delay;
use mipidsi::{models::ST7789, Builder, Orientation};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

/// ST7789 panel on SPI
pub type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

/// Initialize the display, `None` if the panel does not respond.
pub fn init<'a, SPI>(
    spim: Spim<'a, SPI>,
    cs_pin: Output<'a, P0_25>,
    dc_pin: Output<'a, P0_18>,
    rst_pin: Output<'a, P0_26>,
) -> Option<Lcd<'a, SPI>>
where
    SPI: spim::Instance,
{
    Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
        .with_display_size(LCD_W, LCD_H)
        .with_orientation(Orientation::Portrait(false))
        .init(&mut Delay, Some(rst_pin))
        .ok()
}
