//! Millisecond uptime clock
//!
//! One writer, one reader. The tick interrupt is the only context that
//! advances the counter; the command loop only takes snapshots. With a
//! single writer a plain load/store pair is enough to advance it, so no
//! compare-and-swap is needed (thumbv6m has none).

use core::sync::atomic::{AtomicU32, Ordering};

use hilstand_hal::TimerSource;

/// Tick rate of the uptime clock (one tick per millisecond)
pub const TICK_HZ: u32 = 1000;

/// Source of uptime snapshots
pub trait Uptime {
    /// Milliseconds since boot, modulo 2^32
    fn now_ms(&self) -> u32;
}

/// Uptime counter advanced from the tick interrupt
///
/// Wraps silently after 2^32 ms (~49.7 days). Never reset after boot.
pub struct UptimeClock {
    ticks: AtomicU32,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    /// Clock at zero, as at power-on
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Clock preset to `ms`
    ///
    /// Only useful for simulation, e.g. to exercise wraparound without
    /// waiting 49 days.
    pub const fn starting_at(ms: u32) -> Self {
        Self {
            ticks: AtomicU32::new(ms),
        }
    }

    /// Tick interrupt entry point
    ///
    /// Acknowledges the source first, then advances by one tick. Must
    /// only be called from the tick interrupt.
    pub fn on_interrupt<S: TimerSource + ?Sized>(&self, source: &mut S) {
        source.acknowledge();
        self.advance();
    }

    fn advance(&self) {
        // Single writer: nothing else stores between this load and store
        let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(next, Ordering::Release);
    }

    /// Consistent snapshot of the counter
    ///
    /// A 32-bit aligned load is a single bus access on every supported
    /// core, so the interrupt can never be observed half-way through.
    pub fn load(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }
}

impl Uptime for UptimeClock {
    fn now_ms(&self) -> u32 {
        self.load()
    }
}
