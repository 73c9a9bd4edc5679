//! JWS compact serialization: segment splitting and base64url decoding

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

use crate::error::ShcError;
use crate::models::{JwsSegments, Segment};

/// Segment delimiter; never part of the base64url alphabet
pub const DELIMITER: char = '.';

/// Split a compact JWS into its header, payload and signature text
pub fn split_compact(jws: &str) -> Result<[&str; 3], ShcError> {
    let parts: Vec<&str> = jws.split(DELIMITER).collect();
    match parts.as_slice() {
        [header, payload, signature] => Ok([*header, *payload, *signature]),
        _ => Err(ShcError::MalformedJws {
            segments: parts.len(),
        }),
    }
}

/// Number of `=` characters needed to bring a segment to a multiple of 4
///
/// A length that is already a multiple of 4 needs none.
pub fn padding_len(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Append base64 padding to an unpadded segment
pub fn pad_segment(segment: &str) -> Cow<'_, str> {
    match padding_len(segment.len()) {
        0 => Cow::Borrowed(segment),
        n => {
            let mut padded = String::with_capacity(segment.len() + n);
            padded.push_str(segment);
            padded.extend(std::iter::repeat_n('=', n));
            Cow::Owned(padded)
        }
    }
}

/// Pad and decode a single base64url segment
pub fn decode_segment(segment: Segment, text: &str) -> Result<Vec<u8>, ShcError> {
    URL_SAFE
        .decode(pad_segment(text).as_bytes())
        .map_err(|source| ShcError::Base64Decode { segment, source })
}

/// Split a compact JWS and decode all three segments
pub fn decode_segments(jws: &str) -> Result<JwsSegments, ShcError> {
    let [header, payload, signature] = split_compact(jws)?;
    Ok(JwsSegments {
        header: decode_segment(Segment::Header, header)?,
        payload: decode_segment(Segment::Payload, payload)?,
        signature: decode_segment(Segment::Signature, signature)?,
    })
}

/// Join three byte segments into an unpadded compact JWS
pub fn encode_segments(segments: &JwsSegments) -> String {
    Segment::ALL
        .iter()
        .map(|&segment| URL_SAFE_NO_PAD.encode(segments.get(segment)))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_len() {
        assert_eq!(padding_len(0), 0);
        assert_eq!(padding_len(4), 0);
        assert_eq!(padding_len(5), 3);
        assert_eq!(padding_len(6), 2);
        assert_eq!(padding_len(7), 1);
        assert_eq!(padding_len(8), 0);
    }

    #[test]
    fn test_multiple_of_four_is_not_padded() {
        assert!(matches!(pad_segment("eyJh"), Cow::Borrowed("eyJh")));
        // `{"a` is exactly 4 base64 characters
        assert_eq!(decode_segment(Segment::Header, "eyJh").unwrap(), b"{\"a");
    }

    #[test]
    fn test_pad_segment() {
        assert_eq!(pad_segment("eyJ"), "eyJ=");
        assert_eq!(pad_segment("eyJhbG"), "eyJhbG==");
    }

    #[test]
    fn test_url_safe_alphabet() {
        // 0xfb 0xff -> "-_8" in base64url, "+/8" in standard base64
        assert_eq!(decode_segment(Segment::Signature, "-_8").unwrap(), vec![0xfb, 0xff]);
        let err = decode_segment(Segment::Signature, "+/8").unwrap_err();
        assert!(matches!(
            err,
            ShcError::Base64Decode {
                segment: Segment::Signature,
                ..
            }
        ));
    }

    #[test]
    fn test_impossible_length_rejected() {
        // 4k + 1 characters can never be valid base64
        let err = decode_segment(Segment::Payload, "eyJhb").unwrap_err();
        assert!(matches!(err, ShcError::Base64Decode { .. }));
    }

    #[test]
    fn test_segment_count() {
        for jws in ["", "abc", "abc.def", "a.b.c.d", "..."] {
            let err = split_compact(jws).unwrap_err();
            assert!(matches!(err, ShcError::MalformedJws { .. }), "{jws:?}");
        }
        assert_eq!(split_compact("a.b.c").unwrap(), ["a", "b", "c"]);
        assert_eq!(split_compact("..").unwrap(), ["", "", ""]);
    }

    #[test]
    fn test_segment_count_reported() {
        match split_compact("a.b.c.d") {
            Err(ShcError::MalformedJws { segments }) => assert_eq!(segments, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_segments() {
        let segments = decode_segments("eyJhIjoxfQ.AAEC.-_8").unwrap();
        assert_eq!(segments.header, b"{\"a\":1}");
        assert_eq!(segments.payload, vec![0, 1, 2]);
        assert_eq!(segments.signature, vec![0xfb, 0xff]);
    }

    #[test]
    fn test_encode_segments() {
        let segments = JwsSegments {
            header: b"{\"a\":1}".to_vec(),
            payload: vec![0, 1, 2],
            signature: vec![0xfb, 0xff],
        };
        assert_eq!(encode_segments(&segments), "eyJhIjoxfQ.AAEC.-_8");
    }
}
