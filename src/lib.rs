//! shc_decoder - SMART Health Card QR decoding
//!
//! Turns the text of an SHC QR code (`shc:/` followed by digit pairs) into its
//! JOSE header, inflated JSON payload and raw signature bytes. Signature
//! verification and payload validation are left to the caller.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// SHC decoding stages (scheme, numeric, JWS, inflate)
pub mod decoder;
/// Producer side: card to `shc:/` text
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (DecodedCard, JwsSegments, Segment)
pub mod models;
/// QR reading from images
pub mod reader;

pub use decoder::shc_decoder::ShcDecoder;
pub use encoder::encode_card;
pub use error::ShcError;
pub use models::{DecodedCard, JoseHeader, JwsSegments, Segment};
pub use reader::{ImageQrReader, QrReader, ReaderConfig};

use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// Decode SHC QR text into a card
///
/// # Example
/// ```
/// let text = shc_decoder::encode_card(r#"{"alg":"ES256"}"#, r#"{"vc":{}}"#, &[0u8; 64]).unwrap();
/// let card = shc_decoder::decode(&text).unwrap();
/// assert_eq!(card.header(), r#"{"alg":"ES256"}"#);
/// ```
pub fn decode(text: &str) -> Result<DecodedCard, ShcError> {
    ShcDecoder::decode(text)
}

/// Run only the scheme check and numeric conversion, returning the compact JWS
pub fn compact_jws(text: &str) -> Result<String, ShcError> {
    ShcDecoder::compact_jws(text)
}

/// Read the QR code in an encoded image and decode it
pub fn decode_image<R>(reader: &R, image: &[u8]) -> Result<DecodedCard, ShcError>
where
    R: QrReader + ?Sized,
{
    let text = reader.read_text(image).ok_or(ShcError::QrCodeNotFound)?;
    debug!(chars = text.len(), "read QR text");
    decode(&text)
}

/// Read an image file and decode the SHC QR code in it
pub fn decode_image_file<R, P>(reader: &R, path: P) -> Result<DecodedCard, ShcError>
where
    R: QrReader + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ShcError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded image");
    decode_image(reader, &bytes)
}

/// Decode many image files in parallel
///
/// Returns one result per path, in the same order as `paths`.
pub fn decode_image_files<R, P>(reader: &R, paths: &[P]) -> Vec<Result<DecodedCard, ShcError>>
where
    R: QrReader + Sync + ?Sized,
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| decode_image_file(reader, path))
        .collect()
}
