//! Response lines
//!
//! Every counted command produces exactly one line:
//!
//! ```text
//! OK\n                      H, L
//! OK 1\n / OK 0\n           R
//! OK <uptime> <count>\n     S
//! OK MSPM0_HIL_v1.0\n       ?
//! E BAD_CMD\n               anything unrecognised
//! ```
//!
//! The layout is bit-exact: single spaces, no trailing space, one `\n`.

use heapless::Vec;

use crate::decimal::{format_unsigned, parse_unsigned, MAX_DECIMAL_DIGITS};
use crate::{IDENTITY, LINE_END};

/// Longest encoded response (`OK 4294967295 4294967295\n` is 25 bytes)
pub const MAX_RESPONSE_LEN: usize = 32;

const OK: &[u8] = b"OK";
const ERR: &[u8] = b"E";
const SEP: u8 = b' ';

/// Errors while encoding a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer cannot hold the line
    BufferTooSmall,
}

/// Errors while decoding a response line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Line does not end with exactly one `\n`
    MissingTerminator,
    /// Line starts with neither `OK` nor `E `
    UnknownPrefix,
    /// A field is not where or what it should be
    InvalidField,
    /// `E` line with a reason this protocol does not define
    UnknownError,
}

/// Failure reasons carried by `E` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorCode {
    /// Request byte is not a command
    BadCommand,
}

impl ErrorCode {
    /// Wire spelling of the reason
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadCommand => "BAD_CMD",
        }
    }

    fn from_bytes(reason: &[u8]) -> Option<Self> {
        match reason {
            b"BAD_CMD" => Some(ErrorCode::BadCommand),
            _ => None,
        }
    }
}

/// A response line, before encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Bare acknowledgement for `H`/`L`
    Ok,
    /// Measurement pin sample for `R`
    Level(bool),
    /// Snapshot for `S`; uptime first, count second
    Status { uptime_ms: u32, commands: u32 },
    /// Firmware identity for `?`
    Identity,
    /// Rejection
    Error(ErrorCode),
}

/// Cursor over an output buffer
struct LineWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> LineWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn push(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(EncodeError::BufferTooSmall);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn push_byte(&mut self, byte: u8) -> Result<(), EncodeError> {
        self.push(&[byte])
    }

    fn push_decimal(&mut self, value: u32) -> Result<(), EncodeError> {
        let mut digits = [0u8; MAX_DECIMAL_DIGITS];
        let len = format_unsigned(value, &mut digits);
        self.push(&digits[..len])
    }

    fn finish(self) -> usize {
        self.pos
    }
}

impl Response {
    /// Whether this is an `OK` line
    pub fn is_ok(&self) -> bool {
        !matches!(self, Response::Error(_))
    }

    /// Encode the line into `buffer`
    ///
    /// Returns the number of bytes written, terminator included.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let mut w = LineWriter::new(buffer);

        match self {
            Response::Ok => w.push(OK)?,
            Response::Level(high) => {
                w.push(OK)?;
                w.push_byte(SEP)?;
                w.push_byte(if *high { b'1' } else { b'0' })?;
            }
            Response::Status {
                uptime_ms,
                commands,
            } => {
                w.push(OK)?;
                w.push_byte(SEP)?;
                w.push_decimal(*uptime_ms)?;
                w.push_byte(SEP)?;
                w.push_decimal(*commands)?;
            }
            Response::Identity => {
                w.push(OK)?;
                w.push_byte(SEP)?;
                w.push(IDENTITY.as_bytes())?;
            }
            Response::Error(code) => {
                w.push(ERR)?;
                w.push_byte(SEP)?;
                w.push(code.as_str().as_bytes())?;
            }
        }

        w.push_byte(LINE_END)?;
        Ok(w.finish())
    }

    /// Encode the line into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_RESPONSE_LEN>, EncodeError> {
        let mut buffer = [0u8; MAX_RESPONSE_LEN];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| EncodeError::BufferTooSmall)?;
        Ok(vec)
    }

    /// Decode one complete line, terminator included
    pub fn decode(line: &[u8]) -> Result<Self, DecodeError> {
        let body = match line.split_last() {
            Some((&LINE_END, body)) if !body.contains(&LINE_END) => body,
            _ => return Err(DecodeError::MissingTerminator),
        };

        if body == OK {
            return Ok(Response::Ok);
        }

        if let Some(payload) = body.strip_prefix(b"OK ") {
            return match payload {
                b"1" => Ok(Response::Level(true)),
                b"0" => Ok(Response::Level(false)),
                p if p == IDENTITY.as_bytes() => Ok(Response::Identity),
                p => {
                    let mut fields = p.split(|&c| c == SEP);
                    let uptime = fields.next().and_then(parse_unsigned);
                    let commands = fields.next().and_then(parse_unsigned);
                    match (uptime, commands, fields.next()) {
                        (Some(uptime_ms), Some(commands), None) => Ok(Response::Status {
                            uptime_ms,
                            commands,
                        }),
                        _ => Err(DecodeError::InvalidField),
                    }
                }
            };
        }

        if let Some(reason) = body.strip_prefix(b"E ") {
            return ErrorCode::from_bytes(reason)
                .map(Response::Error)
                .ok_or(DecodeError::UnknownError);
        }

        Err(DecodeError::UnknownPrefix)
    }
}

/// Loosely parsed reply, as a controller sees it
///
/// Splits a line into success flag and payload without validating the
/// payload. Trailing `\r`/`\n` are trimmed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    /// `OK` line with its payload (empty for bare `OK`)
    Ok(&'a str),
    /// `E` line with its reason
    Err(&'a str),
    /// Neither prefix
    Unexpected(&'a str),
}

impl<'a> Reply<'a> {
    /// Split a received line
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(rest) = line.strip_prefix("OK") {
            Reply::Ok(rest.strip_prefix(' ').unwrap_or(rest))
        } else if let Some(rest) = line.strip_prefix('E') {
            Reply::Err(rest.strip_prefix(' ').unwrap_or(rest))
        } else {
            Reply::Unexpected(line)
        }
    }

    /// `true` for `OK` lines
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Ok(_))
    }

    /// Text after the prefix
    pub fn payload(&self) -> &'a str {
        match *self {
            Reply::Ok(p) | Reply::Err(p) | Reply::Unexpected(p) => p,
        }
    }

    /// Pin level from an `R` reply
    pub fn level(&self) -> Option<bool> {
        match *self {
            Reply::Ok("1") => Some(true),
            Reply::Ok("0") => Some(false),
            _ => None,
        }
    }

    /// `(uptime_ms, commands)` from an `S` reply
    pub fn status(&self) -> Option<(u32, u32)> {
        let Reply::Ok(payload) = *self else {
            return None;
        };
        let mut fields = payload.split(' ');
        let uptime = parse_unsigned(fields.next()?.as_bytes())?;
        let commands = parse_unsigned(fields.next()?.as_bytes())?;
        if fields.next().is_some() {
            return None;
        }
        Some((uptime, commands))
    }
}
