//! Front panel task
//!
//! Runs the polling loop: wait for a key, act on it, redraw. Pulse
//! timing and the key wait are busy-waits, so this task never yields
//! once the loop is running; UART reception continues in the interrupt
//! handler.

use defmt::*;
use embassy_time::Timer;

use elfpanel_core::config::PanelConfig;
use elfpanel_core::panel::{Flow, FrontPanel, PanelError};
use elfpanel_core::traits::{KeyCode, KeySource, Line, LineDriverExt};

use crate::board::{BoardDisplay, BoardKeys, BoardLines};

/// Key source that logs what reaches the panel
struct LoggedKeys {
    keys: BoardKeys,
    dropped: u32,
    errors: u32,
}

impl KeySource for LoggedKeys {
    fn poll(&mut self, timeout_us: u32) -> Option<KeyCode> {
        let key = self.keys.poll(timeout_us);

        if self.keys.dropped() != self.dropped {
            trace!("Ignored {} unmapped key bytes", self.keys.dropped().wrapping_sub(self.dropped));
            self.dropped = self.keys.dropped();
        }
        if self.keys.errors() != self.errors {
            warn!("UART receive errors: {}", self.keys.errors());
            self.errors = self.keys.errors();
        }
        if let Some(key) = key {
            debug!("Key: {}", key);
        }
        key
    }
}

/// Front panel task
#[embassy_executor::task]
pub async fn panel_task(
    lines: BoardLines,
    keys: BoardKeys,
    mut display: BoardDisplay,
    config: PanelConfig,
) {
    info!("Panel task started");

    Timer::after_micros(u64::from(config.timing.settle_us)).await;

    let mut panel = FrontPanel::new(lines, &config);
    if let Err(e) = panel.start() {
        error!("Panel start-up failed: {}", e);
        if let PanelError::Init(_) = e {
            error!("Check the target's RUN, LOAD, MP and data switches");
        }
        park(&mut panel);
        defmt::panic!("Cannot take control of the target");
    }
    info!("Target in load mode at {=u16:#x}", panel.addr());
    log_status(&mut panel);

    let mut keys = LoggedKeys {
        keys,
        dropped: 0,
        errors: 0,
    };
    let timeout_us = config.poll_timeout_us();
    let mut mode = panel.mode();
    let mut display_ok = true;

    loop {
        match panel.step(&mut keys, &mut display, timeout_us) {
            Ok(Flow::Continue) => {
                if !display_ok {
                    info!("Display recovered");
                    display_ok = true;
                }
            }
            Ok(Flow::Quit) => {
                info!("Quit key, parking target");
                park(&mut panel);
                return;
            }
            Err(e) if !e.is_fatal() => {
                // Logged once per outage, the loop keeps polling
                if display_ok {
                    warn!("Display error: {}", e);
                    display_ok = false;
                }
            }
            Err(e) => {
                error!("Line protocol failure: {}", e);
                park(&mut panel);
                defmt::panic!("Address shadow lost, restart required");
            }
        }

        if panel.mode() != mode {
            info!("Mode {} -> {} at {=u16:#x}", mode, panel.mode(), panel.addr());
            mode = panel.mode();
            log_status(&mut panel);
        }
    }
}

/// Log the target signals at debug level
fn log_status(panel: &mut FrontPanel<BoardLines>) {
    match panel.status() {
        Ok(status) => debug!("Target: {}", status),
        Err(e) => warn!("Status read failed: {}", e),
    }
}

/// Stop the target and stop writing memory, best effort
fn park(panel: &mut FrontPanel<BoardLines>) {
    let lines = panel.lines_mut();
    if lines.release_line(Line::Write).is_err() || lines.assert_line(Line::Wait).is_err() {
        warn!("Could not park the target");
    }
}
