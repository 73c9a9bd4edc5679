//! Error types for the SHC decoding pipeline.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use crate::models::Segment;

/// Every way a decode can fail, one variant per pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum ShcError {
    /// The image file could not be read from disk.
    #[error("cannot read image {}: {source}", .path.display())]
    ImageRead {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The QR reader found no decodable symbol in the image.
    #[error("no QR code found in image")]
    QrCodeNotFound,

    /// QR text does not start with the `shc:/` scheme marker.
    #[error("QR code is not a SMART Health Card (starts with {found:?})")]
    InvalidFormat {
        /// Leading characters of the rejected text
        found: String,
    },

    /// Digit run has odd length or contains non-digit characters.
    #[error("malformed numeric payload: {reason}")]
    MalformedNumericPayload {
        /// What was wrong with the digit run
        reason: String,
    },

    /// JWS compact string did not split into exactly three segments.
    #[error("malformed JWS: expected 3 segments, found {segments}")]
    MalformedJws {
        /// Number of segments actually found
        segments: usize,
    },

    /// A segment is not valid base64url.
    #[error("invalid base64url in {segment} segment: {source}")]
    Base64Decode {
        /// Segment that failed
        segment: Segment,
        /// Underlying base64 error
        #[source]
        source: base64::DecodeError,
    },

    /// Payload is not a complete raw DEFLATE stream.
    #[error("cannot inflate payload: {0}")]
    Inflate(#[source] std::io::Error),

    /// Decoded bytes are not UTF-8 where text is required.
    #[error("{segment} segment is not valid UTF-8: {source}")]
    Encoding {
        /// Segment that failed
        segment: Segment,
        /// Underlying UTF-8 error
        #[source]
        source: FromUtf8Error,
    },
}

impl ShcError {
    /// Stable name of the failure kind, as printed by the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ImageRead { .. } => "ImageReadError",
            Self::QrCodeNotFound => "QRCodeNotFound",
            Self::InvalidFormat { .. } => "InvalidFormat",
            Self::MalformedNumericPayload { .. } => "MalformedNumericPayload",
            Self::MalformedJws { .. } => "MalformedJWS",
            Self::Base64Decode { .. } => "Base64DecodeError",
            Self::Inflate(_) => "InflateError",
            Self::Encoding { .. } => "EncodingError",
        }
    }

    /// Exit code for CLI. 2 is reserved for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ImageRead { .. } => 1,
            Self::QrCodeNotFound => 3,
            Self::InvalidFormat { .. } => 4,

            // Transport-level corruption of the JWS
            Self::MalformedNumericPayload { .. } => 5,
            Self::MalformedJws { .. } => 5,
            Self::Base64Decode { .. } => 5,

            // Content-level failures
            Self::Inflate(_) => 6,
            Self::Encoding { .. } => 6,
        }
    }
}
