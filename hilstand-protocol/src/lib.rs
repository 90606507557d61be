//! Hilstand Controller Protocol
//!
//! This crate defines the serial protocol between an external test
//! controller and the HIL stand. It is deliberately primitive: every
//! request is a single byte, every reply is one ASCII line.
//!
//! # Protocol Overview
//!
//! ```text
//!  controller                     stand
//!      │ ── 'H' ───────────────────▶ │  stimulus HIGH
//!      │ ◀────────────────── OK\n ── │
//!      │ ── 'R' ───────────────────▶ │  sample measurement pin
//!      │ ◀──────────────── OK 1\n ── │
//!      │ ── 'S' ───────────────────▶ │  uptime + command count
//!      │ ◀────────── OK 5321 3\n ─── │
//! ```
//!
//! `\r` and `\n` are swallowed silently so controllers may terminate each
//! command with a newline. Any other byte answers `E BAD_CMD\n`.
//!
//! The controller must not pipeline: each byte gets its reply before the
//! next byte is read.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod banner;
pub mod command;
pub mod decimal;
pub mod response;

pub use banner::{render_banner, validate_product, Banner, BannerError, MAX_PRODUCT_LEN};
pub use command::Command;
pub use decimal::{format_unsigned, parse_unsigned, MAX_DECIMAL_DIGITS};
pub use response::{DecodeError, EncodeError, ErrorCode, Reply, Response, MAX_RESPONSE_LEN};

/// Firmware identity reported by the `?` command
pub const IDENTITY: &str = "MSPM0_HIL_v1.0";

/// Default product name announced in the startup banner
pub const DEFAULT_PRODUCT: &str = IDENTITY;

/// Line terminator closing every response
pub const LINE_END: u8 = b'\n';
