//! elfpanel - Front Panel Firmware for COSMAC Elf class computers
//!
//! Replaces the toggle switches of an Elf with an RP2040: hex keys typed
//! on a serial terminal are turned into WAIT, CLEAR, WRITE and IN
//! sequences on the target's front panel header, and the address and
//! data are shown on a Micro Dot pHAT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use elfpanel_drivers::display::NoDisplay;
use elfpanel_drivers::keys::SerialKeys;
use elfpanel_drivers::lines::{ControlPins, SignalPins};

use crate::board::BoardDisplay;

mod board;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("elfpanel firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    info!("Configuration: {}", config);

    // Terminal on UART0, 115200 8N1
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();
    let keys = SerialKeys::new(rx, embassy_time::Delay);
    info!("UART initialized for terminal keys");

    // Display on I2C0
    let display = if config.display.enabled {
        let mut i2c_config = embassy_rp::i2c::Config::default();
        i2c_config.frequency = 400_000;
        let i2c = embassy_rp::i2c::I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
        let mut matrix = elfpanel_drivers::display::Is31fl3730::new(i2c, config.display.base_address);
        if let Err(e) = matrix.init() {
            // Not fatal: the panel works without a display
            warn!("Display init failed: {}", e);
        }
        info!("Display initialized at {=u8:#x}", config.display.base_address);
        BoardDisplay::Matrix(matrix)
    } else {
        info!("Display disabled");
        BoardDisplay::Absent(NoDisplay)
    };

    // Front panel header
    let control = ControlPins {
        write: Flex::new(p.PIN_6),
        wait: Flex::new(p.PIN_7),
        clear: Flex::new(p.PIN_8),
        input: Flex::new(p.PIN_9),
    };
    let switches = [
        Flex::new(p.PIN_10),
        Flex::new(p.PIN_11),
        Flex::new(p.PIN_12),
        Flex::new(p.PIN_13),
        Flex::new(p.PIN_14),
        Flex::new(p.PIN_15),
        Flex::new(p.PIN_16),
        Flex::new(p.PIN_17),
    ];
    // Pulled up so a disconnected target reads 0xFF
    let leds = [
        Input::new(p.PIN_18, Pull::Up),
        Input::new(p.PIN_19, Pull::Up),
        Input::new(p.PIN_20, Pull::Up),
        Input::new(p.PIN_21, Pull::Up),
        Input::new(p.PIN_22, Pull::Up),
        Input::new(p.PIN_26, Pull::Up),
        Input::new(p.PIN_27, Pull::Up),
        Input::new(p.PIN_28, Pull::Up),
    ];
    let signals = SignalPins {
        q: Input::new(p.PIN_2, Pull::Down),
        ef3: Input::new(p.PIN_3, Pull::Up),
    };
    let lines = board::lines(control, switches, leds, signals);
    info!("Front panel lines initialized");

    spawner
        .spawn(tasks::panel_task(lines, keys, display, config))
        .unwrap();

    info!("Panel task spawned, firmware running");
}
