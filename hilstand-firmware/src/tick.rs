//! Millisecond tick
//!
//! SysTick fires once per millisecond and advances [`UPTIME`]. The
//! exception handler is the clock's only writer.

use core::cell::RefCell;

use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use hilstand_core::UptimeClock;
use hilstand_hal::{ClockError, TickDivider, TimerSource};
use hilstand_hal_rp2040::SysTickSource;

use crate::config;

/// Milliseconds since the tick was started
pub static UPTIME: UptimeClock = UptimeClock::new();

static SOURCE: Mutex<CriticalSectionRawMutex, RefCell<Option<SysTickSource>>> =
    Mutex::new(RefCell::new(None));

/// Install SysTick as the tick source and start it
pub fn start(syst: SYST, core_hz: u32) -> Result<TickDivider, ClockError> {
    let divider = SysTickSource::divider_for(core_hz, config::TICK_HZ)?;

    // Installed before it is started so the first exception finds it
    SOURCE.lock(|cell| {
        cell.borrow_mut()
            .insert(SysTickSource::new(syst))
            .start(divider)
    });

    Ok(divider)
}

#[exception]
fn SysTick() {
    SOURCE.lock(|cell| {
        if let Some(source) = cell.borrow_mut().as_mut() {
            UPTIME.on_interrupt(source);
        }
    });
}
