//! Numeric token readers. These consume the byte slices the state machine
//! marks off and accumulate them into a 32-bit signed value, wide enough that
//! a value outside the eventual range (0xffff, 0xff, 128, 65535 depending on
//! caller) is still representable and can be range-checked by the caller
//! rather than clamped or rejected here.

use crate::error::DiagKind;

///Parses a byte slice of `0`..`9` into a 32-bit accumulator.
///
///Any byte outside `0`..`9` is a defensive error: the state machine only ever
///extends a decimal token with bytes already classified as digits, so this
///path is normally unreachable.
pub(crate) fn decimal(token: &[u8]) -> Result<i32, DiagKind> {
    let mut accumulate: i32 = 0;
    for &byte in token {
        match byte {
            b'0'..=b'9' => {
                let digit = (byte - b'0') as i32;
                accumulate = accumulate.wrapping_mul(10).wrapping_add(digit);
            }
            _ => return Err(DiagKind::InvalidDecimalToken),
        }
    }
    Ok(accumulate)
}

///Parses a byte slice of `0`..`9` / `a`..`f` / `A`..`F` into a 32-bit accumulator.
///
///Any byte outside that set is a defensive error; see [`decimal`].
pub(crate) fn hexadecimal(token: &[u8]) -> Result<i32, DiagKind> {
    let mut accumulate: i32 = 0;
    for &byte in token {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => 10 + (byte - b'a'),
            b'A'..=b'F' => 10 + (byte - b'A'),
            _ => return Err(DiagKind::InvalidHexToken),
        };
        accumulate = (accumulate << 4) | digit as i32;
    }
    Ok(accumulate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_reads_digits() {
        assert_eq!(decimal(b"0"), Ok(0));
        assert_eq!(decimal(b"128"), Ok(128));
        assert_eq!(decimal(b"65535"), Ok(65535));
    }

    #[test]
    fn decimal_rejects_non_digit() {
        assert_eq!(decimal(b"12a"), Err(DiagKind::InvalidDecimalToken));
    }

    #[test]
    fn hexadecimal_reads_mixed_case() {
        assert_eq!(hexadecimal(b"dB8"), Ok(0x0db8));
        assert_eq!(hexadecimal(b"FFFF"), Ok(0xffff));
        assert_eq!(hexadecimal(b""), Ok(0));
    }

    #[test]
    fn hexadecimal_rejects_bad_byte() {
        assert_eq!(hexadecimal(b"12g"), Err(DiagKind::InvalidHexToken));
    }
}
