//! RP2040-specific HAL for the Hilstand stand
//!
//! This crate provides RP2040 implementations of the shared
//! `hilstand-hal` traits:
//! - Stimulus output and pulled-down measurement input
//! - Blocking UART transport with baud divisor checking
//! - SysTick as the millisecond tick source

#![no_std]

pub mod gpio;
pub mod tick;
pub mod uart;

pub use gpio::{MeasurementInput, StimulusOutput};
pub use tick::{SysTickSource, SYSTICK_LIMITS};
pub use uart::{BaudDivisor, SerialPort, TransportError, UartBusError};
