//! Board-agnostic core logic for the HIL stand firmware
//!
//! This crate contains everything that does not touch registers:
//!
//! - Uptime clock shared between the tick interrupt and the command loop
//! - Pin controller over one stimulus output and one measurement input
//! - Command interpreter (classification, side effects, responses)
//! - Run-forever service loop over a blocking byte transport
//!
//! Hardware enters only through the `hilstand-hal` traits, so the whole
//! loop runs on the host against simulated pins and a scripted UART.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod interpreter;
pub mod pins;
pub mod service;

pub use clock::{Uptime, UptimeClock, TICK_HZ};
pub use interpreter::Interpreter;
pub use pins::{PinController, PinPair};
pub use service::{Service, ServiceError, Step};
