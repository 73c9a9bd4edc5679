//! SHC decoding pipeline
//!
//! QR text flows through these stages in order:
//! - Scheme validation (`shc:/` prefix)
//! - Numeric to JWS conversion (digit pairs + 45)
//! - JWS segment splitting and base64url decoding
//! - Raw DEFLATE payload inflation

/// Raw DEFLATE inflation of the payload segment
pub mod inflate;
/// JWS compact splitting, padding and base64url decoding
pub mod jws;
/// Digit pair to character conversion
pub mod numeric;
/// `shc:/` scheme validation
pub mod prefix;
/// Orchestrates the stages into a decoded card
pub mod shc_decoder;
