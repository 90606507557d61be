//! Simulated stand hardware for scenario tests.
//!
//! Loopback or open pins on a shared wire, a scripted UART and a tick
//! timer that counts acknowledgements. Tests drive the real `Service`
//! loop against them.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use hilstand_core::{PinPair, Service, UptimeClock};
use hilstand_hal::{InputPin, OutputPin, TickDivider, TimerSource, UartRx, UartTx};

// ── Pins ──────────────────────────────────────────────────────

/// Shared electrical node
#[derive(Clone, Default)]
pub struct Wire(Rc<Cell<bool>>);

impl Wire {
    pub fn is_high(&self) -> bool {
        self.0.get()
    }

    pub fn drive(&self, high: bool) {
        self.0.set(high);
    }
}

pub struct SimOutput {
    wire: Wire,
}

impl OutputPin for SimOutput {
    fn set_high(&mut self) {
        self.wire.drive(true);
    }

    fn set_low(&mut self) {
        self.wire.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.wire.is_high()
    }
}

/// Measurement input with pull-down: reads low when nothing is attached
pub struct SimInput {
    wire: Option<Wire>,
}

impl InputPin for SimInput {
    fn is_high(&self) -> bool {
        self.wire.as_ref().is_some_and(Wire::is_high)
    }
}

pub type SimPins = PinPair<SimOutput, SimInput>;

// ── UART ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimFault {
    /// Script ran out of bytes
    Exhausted,
    /// Injected line error (framing, parity, ...)
    Line,
}

#[derive(Default)]
pub struct ScriptedUart {
    rx: VecDeque<Result<u8, SimFault>>,
    tx: Vec<u8>,
}

impl ScriptedUart {
    pub fn send(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied().map(Ok));
    }

    pub fn inject_fault(&mut self) {
        self.rx.push_back(Err(SimFault::Line));
    }

    pub fn is_drained(&self) -> bool {
        self.rx.is_empty()
    }

    /// Everything written so far, as text
    pub fn output(&self) -> String {
        String::from_utf8(self.tx.clone()).expect("stand output is ASCII")
    }

    /// Take everything written so far
    pub fn take_output(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.tx)).expect("stand output is ASCII")
    }
}

impl UartRx for ScriptedUart {
    type Error = SimFault;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, SimFault> {
        buf[0] = self.rx.pop_front().ok_or(SimFault::Exhausted)??;
        Ok(1)
    }
}

impl UartTx for ScriptedUart {
    type Error = SimFault;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SimFault> {
        self.tx.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimFault> {
        Ok(())
    }
}

// ── Timer ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct SimTimer {
    pub divider: Option<TickDivider>,
    pub acks: u32,
}

impl TimerSource for SimTimer {
    fn start(&mut self, divider: TickDivider) {
        self.divider = Some(divider);
    }

    fn acknowledge(&mut self) {
        self.acks += 1;
    }
}

/// Fire `ms` tick interrupts
pub fn elapse(clock: &UptimeClock, timer: &mut SimTimer, ms: u32) {
    for _ in 0..ms {
        clock.on_interrupt(timer);
    }
}

// ── Board ─────────────────────────────────────────────────────

pub type SimService<'c> = Service<'c, SimPins, ScriptedUart, UptimeClock>;

/// Pins with stimulus looped back to measurement
pub fn looped_pins() -> (SimPins, Wire) {
    let wire = Wire::default();
    let pins = PinPair::new(
        SimOutput { wire: wire.clone() },
        SimInput {
            wire: Some(wire.clone()),
        },
    );
    (pins, wire)
}

/// Pins with nothing attached to the measurement input
pub fn open_pins() -> (SimPins, Wire) {
    let wire = Wire::default();
    let pins = PinPair::new(SimOutput { wire: wire.clone() }, SimInput { wire: None });
    (pins, wire)
}

/// Freshly booted service with looped pins
pub fn boot(clock: &UptimeClock) -> (SimService<'_>, Wire) {
    let (pins, wire) = looped_pins();
    (Service::new(pins, ScriptedUart::default(), clock), wire)
}

/// Send `bytes` and run until they are consumed; returns the output
pub fn exchange(service: &mut SimService<'_>, bytes: &[u8]) -> String {
    service.transport_mut().send(bytes);
    service
        .run_until(|s| s.transport().is_drained())
        .expect("scripted exchange");
    service.transport_mut().take_output()
}
