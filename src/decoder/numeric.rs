//! SHC numeric mode conversion
//!
//! Each JWS character is stored as two decimal digits holding `code point - 45`,
//! which keeps the whole JWS inside QR numeric mode.

use crate::error::ShcError;

/// Offset added to each digit pair
pub const CHAR_OFFSET: u32 = 45;

/// Convert an SHC digit run (prefix already stripped) into a JWS compact string
pub fn numeric_to_jws(digits: &str) -> Result<String, ShcError> {
    let bytes = digits.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(ShcError::MalformedNumericPayload {
            reason: format!("odd digit count {}", bytes.len()),
        });
    }

    let mut jws = String::with_capacity(bytes.len() / 2);
    for (pair_idx, pair) in bytes.chunks_exact(2).enumerate() {
        let mut value = 0u32;
        for (i, &b) in pair.iter().enumerate() {
            if !b.is_ascii_digit() {
                // Report the offending character, not the byte, for non-ASCII input
                let offset = pair_idx * 2 + i;
                let found = digits[offset..].chars().next().unwrap_or('?');
                return Err(ShcError::MalformedNumericPayload {
                    reason: format!("non-digit {:?} at offset {}", found, offset),
                });
            }
            value = value * 10 + (b - b'0') as u32;
        }

        // 0..=99 + 45 is always a valid scalar value
        match char::from_u32(value + CHAR_OFFSET) {
            Some(c) => jws.push(c),
            None => {
                return Err(ShcError::MalformedNumericPayload {
                    reason: format!("pair {:02} has no character", value),
                });
            }
        }
    }

    Ok(jws)
}

/// Encode a JWS compact string as an SHC digit run (no prefix)
///
/// Returns `None` if a character falls outside code points 45..=144.
pub fn jws_to_numeric(jws: &str) -> Option<String> {
    let mut digits = String::with_capacity(jws.len() * 2);
    for c in jws.chars() {
        let value = (c as u32).checked_sub(CHAR_OFFSET)?;
        if value > 99 {
            return None;
        }
        digits.push_str(&format!("{:02}", value));
    }
    Some(digits)
}
