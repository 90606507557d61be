//! Command interpreter
//!
//! Maps one classified command to its side effect and response. The
//! interpreter owns the command counter and the pin controller; the
//! uptime clock is borrowed per call so the interrupt can keep writing it.

use hilstand_hal::Level;
use hilstand_protocol::{Command, ErrorCode, Response};

use crate::clock::Uptime;
use crate::pins::PinController;

/// Command dispatcher
pub struct Interpreter<P> {
    pins: P,
    commands: u32,
}

impl<P: PinController> Interpreter<P> {
    /// Interpreter with a zero command count
    pub fn new(pins: P) -> Self {
        Self { pins, commands: 0 }
    }

    /// Commands processed since boot, modulo 2^32
    ///
    /// Unknown bytes count; `\r` and `\n` do not.
    pub fn command_count(&self) -> u32 {
        self.commands
    }

    /// The pin controller
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Classify and execute one request byte
    pub fn handle_byte<U: Uptime + ?Sized>(&mut self, byte: u8, uptime: &U) -> Option<Response> {
        self.dispatch(Command::classify(byte), uptime)
    }

    /// Execute a command
    ///
    /// Returns `None` only for [`Command::Ignore`]. Every other command
    /// advances the counter exactly once and yields exactly one response.
    pub fn dispatch<U: Uptime + ?Sized>(
        &mut self,
        command: Command,
        uptime: &U,
    ) -> Option<Response> {
        let response = match command {
            Command::Ignore => return None,
            Command::SetHigh => {
                self.pins.set_output(Level::High);
                Response::Ok
            }
            Command::SetLow => {
                self.pins.set_output(Level::Low);
                Response::Ok
            }
            Command::ReadInput => Response::Level(self.pins.read_input()),
            // The reported count includes this S
            Command::Status => Response::Status {
                uptime_ms: uptime.now_ms(),
                commands: self.commands.wrapping_add(1),
            },
            Command::Identify => Response::Identity,
            Command::Unknown(_) => Response::Error(ErrorCode::BadCommand),
        };

        self.commands = self.commands.wrapping_add(1);
        Some(response)
    }

    /// Preset the counter, for simulation only
    #[doc(hidden)]
    pub fn with_command_count(mut self, commands: u32) -> Self {
        self.commands = commands;
        self
    }
}
