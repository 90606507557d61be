//! Decimal rendering of unsigned counters
//!
//! Responses carry uptime and command counts as plain decimal. No
//! `core::fmt` machinery is involved; the digits are produced directly.

/// Digits needed for `u32::MAX` (4294967295)
pub const MAX_DECIMAL_DIGITS: usize = 10;

/// Write the shortest decimal form of `value` at the start of `buf`
///
/// No sign, no leading zeros, `"0"` for zero. Returns the number of
/// bytes written.
///
/// # Panics
///
/// If `buf` is shorter than the rendered value. Callers reserve
/// [`MAX_DECIMAL_DIGITS`] bytes.
pub fn format_unsigned(value: u32, buf: &mut [u8]) -> usize {
    let mut digits = [0u8; MAX_DECIMAL_DIGITS];
    let mut n = 0;
    let mut rest = value;

    // Least significant digit first
    loop {
        digits[n] = b'0' + (rest % 10) as u8;
        n += 1;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    for (dst, src) in buf[..n].iter_mut().zip(digits[..n].iter().rev()) {
        *dst = *src;
    }
    n
}

/// Parse a decimal field produced by [`format_unsigned`]
///
/// Rejects empty input, non-digits, leading zeros and overflow.
pub fn parse_unsigned(text: &[u8]) -> Option<u32> {
    if text.is_empty() || text.len() > MAX_DECIMAL_DIGITS {
        return None;
    }
    if text.len() > 1 && text[0] == b'0' {
        return None;
    }

    let mut value: u32 = 0;
    for &c in text {
        if !c.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add((c - b'0') as u32)?;
    }
    Some(value)
}
