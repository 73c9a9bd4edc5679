//! `shc:/` scheme detection and stripping

use crate::error::ShcError;

/// Scheme marker every SMART Health Card QR payload starts with
pub const SHC_PREFIX: &str = "shc:/";

/// How much of a rejected string to echo back in the error
const PREVIEW_CHARS: usize = 16;

/// Check that QR text carries the `shc:/` scheme and return the digit run after it
pub fn strip_shc_prefix(text: &str) -> Result<&str, ShcError> {
    text.strip_prefix(SHC_PREFIX)
        .ok_or_else(|| ShcError::InvalidFormat {
            found: text.chars().take(PREVIEW_CHARS).collect(),
        })
}

/// True if the text looks like an SHC numeric string
pub fn is_shc_text(text: &str) -> bool {
    text.starts_with(SHC_PREFIX)
}
