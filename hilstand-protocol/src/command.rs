//! Command classification
//!
//! Every received byte maps to exactly one [`Command`]. Classification is
//! total and case-sensitive: `h` is not `H`.

/// Command bytes
pub mod byte {
    pub const SET_HIGH: u8 = b'H';
    pub const SET_LOW: u8 = b'L';
    pub const READ_INPUT: u8 = b'R';
    pub const STATUS: u8 = b'S';
    pub const IDENTIFY: u8 = b'?';
    pub const CR: u8 = b'\r';
    pub const LF: u8 = b'\n';
}

/// A command decoded from one request byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive the stimulus pin high
    SetHigh,
    /// Drive the stimulus pin low
    SetLow,
    /// Sample the measurement pin
    ReadInput,
    /// Report uptime and command count
    Status,
    /// Report firmware identity
    Identify,
    /// Bare line terminator, produces nothing
    Ignore,
    /// Anything else
    Unknown(u8),
}

impl Command {
    /// Classify a request byte
    pub fn classify(b: u8) -> Self {
        match b {
            byte::SET_HIGH => Command::SetHigh,
            byte::SET_LOW => Command::SetLow,
            byte::READ_INPUT => Command::ReadInput,
            byte::STATUS => Command::Status,
            byte::IDENTIFY => Command::Identify,
            byte::CR | byte::LF => Command::Ignore,
            other => Command::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KNOWN: [u8; 7] = [b'H', b'L', b'R', b'S', b'?', b'\r', b'\n'];

    #[test]
    fn test_known_commands() {
        assert_eq!(Command::classify(b'H'), Command::SetHigh);
        assert_eq!(Command::classify(b'L'), Command::SetLow);
        assert_eq!(Command::classify(b'R'), Command::ReadInput);
        assert_eq!(Command::classify(b'S'), Command::Status);
        assert_eq!(Command::classify(b'?'), Command::Identify);
        assert_eq!(Command::classify(b'\r'), Command::Ignore);
        assert_eq!(Command::classify(b'\n'), Command::Ignore);
    }

    #[test]
    fn test_case_sensitive() {
        for b in [b'h', b'l', b'r', b's'] {
            assert_eq!(Command::classify(b), Command::Unknown(b));
        }
    }

    #[test]
    fn test_whitespace_other_than_terminators_is_unknown() {
        assert_eq!(Command::classify(b' '), Command::Unknown(b' '));
        assert_eq!(Command::classify(b'\t'), Command::Unknown(b'\t'));
    }

    proptest! {
        #[test]
        fn classify_is_total_and_stable(b in any::<u8>()) {
            let cmd = Command::classify(b);
            if KNOWN.contains(&b) {
                prop_assert!(!matches!(cmd, Command::Unknown(_)));
            } else {
                prop_assert_eq!(cmd, Command::Unknown(b));
            }
            prop_assert_eq!(Command::classify(b), cmd);
        }
    }
}
