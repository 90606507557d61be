//! SysTick tick source
//!
//! SysTick is a 24-bit down-counter clocked from clk_sys with no
//! prescaler. At the default 125 MHz one millisecond is 125 000 cycles,
//! well inside the reload range.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use hilstand_hal::{ClockError, DividerLimits, TickDivider, TimerSource};

/// SysTick divider range
pub const SYSTICK_LIMITS: DividerLimits = DividerLimits {
    max_prescale: 1,
    max_reload: 0x00FF_FFFF,
};

/// SysTick driven from the core clock
pub struct SysTickSource {
    syst: SYST,
}

impl SysTickSource {
    /// Take ownership of SysTick; it stays stopped until [`TimerSource::start`]
    pub fn new(mut syst: SYST) -> Self {
        syst.disable_counter();
        syst.disable_interrupt();
        Self { syst }
    }

    /// Divider producing `tick_hz` from a `core_hz` clk_sys
    ///
    /// Only exact dividers are accepted; an inexact one would make the
    /// uptime drift against the host's clock.
    pub fn divider_for(core_hz: u32, tick_hz: u32) -> Result<TickDivider, ClockError> {
        let divider = TickDivider::solve(core_hz, tick_hz, SYSTICK_LIMITS)?;
        if divider.is_exact(core_hz, tick_hz) {
            Ok(divider)
        } else {
            Err(ClockError::Inexact)
        }
    }
}

impl TimerSource for SysTickSource {
    fn start(&mut self, divider: TickDivider) {
        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.set_reload(divider.reload);
        self.syst.clear_current();
        self.syst.enable_interrupt();
        self.syst.enable_counter();
    }

    fn acknowledge(&mut self) {
        // Reading CSR clears COUNTFLAG
        let _ = self.syst.has_wrapped();
    }
}
