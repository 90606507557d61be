//! Periodic tick source abstraction
//!
//! The uptime clock needs exactly one thing from hardware: an interrupt
//! every tick whose pending flag can be cleared. The divider solver picks
//! the prescale/reload pair that turns a known input clock into that tick.

/// Periodic interrupt source driving the uptime clock
pub trait TimerSource {
    /// Program the divider and start generating interrupts
    fn start(&mut self, divider: TickDivider);

    /// Clear the source's pending-interrupt flag
    ///
    /// Must run once per interrupt, before the handler returns. Leaving
    /// the flag set re-enters the handler forever on most sources.
    fn acknowledge(&mut self);
}

/// Errors from tick divider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Input clock or tick rate is zero
    ZeroFrequency,
    /// Requested tick is faster than the input clock
    TickTooFast,
    /// Even the largest prescale leaves a period wider than the reload register
    ReloadOverflow,
    /// No divider hits the tick rate exactly
    Inexact,
}

/// Hardware limits of a timer's divider chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DividerLimits {
    /// Largest supported prescale ratio (1 = no prescaler)
    pub max_prescale: u32,
    /// Largest value the reload/load register accepts
    pub max_reload: u32,
}

/// Prescale and reload values producing one tick
///
/// One tick lasts `prescale * (reload + 1)` input clock cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDivider {
    /// Input clock division ratio, 1-based
    pub prescale: u32,
    /// Value loaded into the counter; the counter spans `reload + 1` steps
    pub reload: u32,
}

impl TickDivider {
    /// Input cycles spanned by one tick
    pub fn cycles_per_tick(&self) -> u64 {
        self.prescale as u64 * (self.reload as u64 + 1)
    }

    /// Whether this divider produces `tick_hz` from `input_hz` with no error
    pub fn is_exact(&self, input_hz: u32, tick_hz: u32) -> bool {
        self.cycles_per_tick() * tick_hz as u64 == input_hz as u64
    }

    /// Period error relative to the requested tick, in parts per million
    pub fn error_ppm(&self, input_hz: u32, tick_hz: u32) -> u32 {
        if input_hz == 0 {
            return u32::MAX;
        }
        let produced = self.cycles_per_tick() * tick_hz as u64;
        let diff = produced.abs_diff(input_hz as u64);
        (diff * 1_000_000 / input_hz as u64).min(u32::MAX as u64) as u32
    }

    /// Pick a divider for `tick_hz` from an `input_hz` clock
    ///
    /// An exact pair is preferred, with the smallest prescale winning so
    /// the counter keeps the finest resolution. Without an exact pair the
    /// minimum-error pair is returned; check [`TickDivider::error_ppm`].
    pub fn solve(input_hz: u32, tick_hz: u32, limits: DividerLimits) -> Result<Self, ClockError> {
        if input_hz == 0 || tick_hz == 0 || limits.max_prescale == 0 {
            return Err(ClockError::ZeroFrequency);
        }
        if tick_hz > input_hz {
            return Err(ClockError::TickTooFast);
        }

        let input = input_hz as u64;
        let tick = tick_hz as u64;
        let max_span = limits.max_reload as u64 + 1;

        let mut best: Option<(u64, TickDivider)> = None;

        for prescale in 1..=limits.max_prescale as u64 {
            let step = prescale * tick;
            // Round to nearest span
            let span = (input + step / 2) / step;
            if span == 0 {
                // Larger prescales only shrink the span further
                break;
            }
            if span > max_span {
                continue;
            }

            let divider = TickDivider {
                prescale: prescale as u32,
                reload: (span - 1) as u32,
            };
            let diff = (span * step).abs_diff(input);
            if diff == 0 {
                return Ok(divider);
            }
            if best.map_or(true, |(best_diff, _)| diff < best_diff) {
                best = Some((diff, divider));
            }
        }

        best.map(|(_, divider)| divider)
            .ok_or(ClockError::ReloadOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTICK: DividerLimits = DividerLimits {
        max_prescale: 1,
        max_reload: 0x00FF_FFFF,
    };

    const GPTIMER_16: DividerLimits = DividerLimits {
        max_prescale: 256,
        max_reload: 0xFFFF,
    };

    #[test]
    fn test_systick_rp2040_default_clock() {
        let divider = TickDivider::solve(125_000_000, 1000, SYSTICK).unwrap();
        assert_eq!(divider, TickDivider { prescale: 1, reload: 124_999 });
        assert!(divider.is_exact(125_000_000, 1000));
        assert_eq!(divider.error_ppm(125_000_000, 1000), 0);
    }

    #[test]
    fn test_prefers_smallest_exact_prescale() {
        let divider = TickDivider::solve(32_000_000, 1000, GPTIMER_16).unwrap();
        assert_eq!(divider, TickDivider { prescale: 1, reload: 31_999 });
    }

    #[test]
    fn test_narrow_reload_forces_prescale() {
        // 32 MHz / 32 = 1 MHz, load 999: a 1 ms tick on a 10-bit counter
        let limits = DividerLimits {
            max_prescale: 256,
            max_reload: 999,
        };
        let divider = TickDivider::solve(32_000_000, 1000, limits).unwrap();
        assert_eq!(divider, TickDivider { prescale: 32, reload: 999 });
        assert!(divider.is_exact(32_000_000, 1000));
    }

    #[test]
    fn test_inexact_returns_minimum_error() {
        let divider = TickDivider::solve(12_000_007, 1000, SYSTICK).unwrap();
        assert_eq!(divider.reload, 11_999);
        assert!(!divider.is_exact(12_000_007, 1000));
        assert_eq!(divider.error_ppm(12_000_007, 1000), 0); // 7 cycles in 12M
    }

    #[test]
    fn test_reload_overflow() {
        // 125 MHz at 1 Hz needs 125M counts, SysTick holds 16M
        assert_eq!(
            TickDivider::solve(125_000_000, 1, SYSTICK),
            Err(ClockError::ReloadOverflow)
        );
    }

    #[test]
    fn test_invalid_frequencies() {
        assert_eq!(
            TickDivider::solve(0, 1000, SYSTICK),
            Err(ClockError::ZeroFrequency)
        );
        assert_eq!(
            TickDivider::solve(1_000_000, 0, SYSTICK),
            Err(ClockError::ZeroFrequency)
        );
        assert_eq!(
            TickDivider::solve(1000, 2000, SYSTICK),
            Err(ClockError::TickTooFast)
        );
    }
}
