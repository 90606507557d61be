//! Run-forever command service
//!
//! Reads one byte, dispatches it, writes at most one response line, and
//! goes back to reading. The blocking byte read is the only suspension
//! point; the tick interrupt keeps advancing uptime meanwhile.
//!
//! ```text
//!            ┌──────────────┐  byte   ┌─────────────┐
//!  start ──▶ │ AwaitingByte │ ──────▶ │ Dispatching │
//!            └──────────────┘         └─────────────┘
//!                   ▲    response written / ignored │
//!                   └───────────────────────────────┘
//! ```

use hilstand_hal::{UartRx, UartTx};
use hilstand_protocol::{render_banner, BannerError, Command, EncodeError, Response};

use crate::clock::Uptime;
use crate::interpreter::Interpreter;
use crate::pins::PinController;

/// Outcome of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Line terminator, nothing written
    Ignored,
    /// A response line was written
    Replied(Command, Response),
}

/// Errors surfaced by the service loop
///
/// None of these are fatal once the loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceError<E> {
    /// Transport failed to deliver a byte; nothing was dispatched
    Read(E),
    /// Transport failed to send a response; the command already ran
    Write(E),
    /// Response did not fit the line buffer
    Encode(EncodeError),
    /// Configured product name cannot be announced
    Banner(BannerError),
}

/// The command loop bound to its pins, transport and clock
pub struct Service<'c, P, T, U: ?Sized> {
    interpreter: Interpreter<P>,
    transport: T,
    uptime: &'c U,
}

impl<'c, P, T, U, E> Service<'c, P, T, U>
where
    P: PinController,
    T: UartRx<Error = E> + UartTx<Error = E>,
    U: Uptime + ?Sized,
{
    /// Bind the loop to its collaborators
    pub fn new(pins: P, transport: T, uptime: &'c U) -> Self {
        Self::with_interpreter(Interpreter::new(pins), transport, uptime)
    }

    /// Bind the loop around an existing interpreter
    pub fn with_interpreter(interpreter: Interpreter<P>, transport: T, uptime: &'c U) -> Self {
        Self {
            interpreter,
            transport,
            uptime,
        }
    }

    /// Send the startup banner
    pub fn announce(&mut self, product: &str) -> Result<(), ServiceError<E>> {
        let banner = render_banner(product).map_err(ServiceError::Banner)?;
        self.send(&banner)
    }

    /// Process exactly one request byte
    ///
    /// Blocks for the byte, then dispatches it and writes the reply
    /// before returning.
    pub fn poll(&mut self) -> Result<Step, ServiceError<E>> {
        let byte = self.transport.read_byte().map_err(ServiceError::Read)?;
        self.execute(Command::classify(byte))
    }

    fn execute(&mut self, command: Command) -> Result<Step, ServiceError<E>> {
        let Some(response) = self.interpreter.dispatch(command, self.uptime) else {
            return Ok(Step::Ignored);
        };

        let line = response.encode_to_vec().map_err(ServiceError::Encode)?;
        self.send(&line)?;
        Ok(Step::Replied(command, response))
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), ServiceError<E>> {
        self.transport
            .write_blocking(bytes)
            .map_err(ServiceError::Write)?;
        self.transport.flush().map_err(ServiceError::Write)
    }

    /// Serve forever
    ///
    /// Every iteration's outcome is handed to `observe` and the loop
    /// carries on, errors included; there is no state to roll back and
    /// nothing to retry.
    pub fn run(mut self, mut observe: impl FnMut(Result<Step, ServiceError<E>>)) -> ! {
        loop {
            observe(self.poll());
        }
    }

    /// Serve until `stop` returns `true`
    ///
    /// Cancellation hook for test harnesses. `stop` is checked before
    /// each byte is read; the first error ends the loop.
    pub fn run_until(
        &mut self,
        mut stop: impl FnMut(&Self) -> bool,
    ) -> Result<(), ServiceError<E>> {
        while !stop(self) {
            self.poll()?;
        }
        Ok(())
    }

    /// The interpreter and its counters
    pub fn interpreter(&self) -> &Interpreter<P> {
        &self.interpreter
    }

    /// The transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The transport, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
