//! Full text-to-card pipeline: prefix, numeric pairs, JWS segments, inflate

use tracing::debug;

use super::inflate::inflate_payload;
use super::jws::decode_segments;
use super::numeric::numeric_to_jws;
use super::prefix::strip_shc_prefix;
use crate::error::ShcError;
use crate::models::{DecodedCard, JwsSegments, Segment};

/// Decoder for SHC numeric QR text
///
/// Stateless; every call runs the full pipeline on its own input.
pub struct ShcDecoder;

impl ShcDecoder {
    /// Decode QR text into header, inflated payload and raw signature
    pub fn decode(text: &str) -> Result<DecodedCard, ShcError> {
        let jws = Self::compact_jws(text)?;

        let JwsSegments {
            header,
            payload,
            signature,
        } = decode_segments(&jws)?;
        debug!(
            header_bytes = header.len(),
            payload_bytes = payload.len(),
            signature_bytes = signature.len(),
            "decoded JWS segments"
        );

        // The header travels uncompressed
        let header = String::from_utf8(header).map_err(|source| ShcError::Encoding {
            segment: Segment::Header,
            source,
        })?;
        let payload = inflate_payload(&payload)?;
        debug!(payload_chars = payload.len(), "inflated payload");

        Ok(DecodedCard::new(header, payload, signature))
    }

    /// Validate the scheme and convert the digit run back to a compact JWS
    pub fn compact_jws(text: &str) -> Result<String, ShcError> {
        let digits = strip_shc_prefix(text)?;
        let jws = numeric_to_jws(digits)?;
        debug!(digits = digits.len(), jws_chars = jws.len(), "converted numeric payload");
        Ok(jws)
    }
}
