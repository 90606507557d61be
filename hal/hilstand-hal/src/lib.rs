//! Hilstand Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interfaces the stand firmware
//! depends on. Chip-specific HALs implement them; the command interpreter
//! and its host-side tests only ever see these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  hilstand-core (interpreter, clock)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  hilstand-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ hilstand-hal- │       │  host test    │
//! │    rp2040     │       │   doubles     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial byte transport
//! - [`timer::TimerSource`] - Periodic tick interrupt source

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin};
pub use timer::{ClockError, DividerLimits, TickDivider, TimerSource};
pub use uart::{UartConfig, UartRx, UartTx};
