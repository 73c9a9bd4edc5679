//! Producer side of the SHC pipeline
//!
//! Builds `shc:/` numeric text from a header, payload and signature. Issuers sign
//! the JWS before encoding; this module only handles the transport encoding.

use std::io;

use crate::decoder::inflate::deflate_payload;
use crate::decoder::jws::encode_segments;
use crate::decoder::numeric::jws_to_numeric;
use crate::decoder::prefix::SHC_PREFIX;
use crate::models::JwsSegments;

/// Encode a card as SHC numeric QR text
pub fn encode_card(header: &str, payload: &str, signature: &[u8]) -> io::Result<String> {
    let segments = JwsSegments {
        header: header.as_bytes().to_vec(),
        payload: deflate_payload(payload)?,
        signature: signature.to_vec(),
    };
    encode_jws(&encode_segments(&segments))
}

/// Encode an already assembled compact JWS as SHC numeric QR text
pub fn encode_jws(jws: &str) -> io::Result<String> {
    let digits = jws_to_numeric(jws).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "JWS contains characters outside the SHC numeric range",
        )
    })?;
    Ok(format!("{}{}", SHC_PREFIX, digits))
}
