//! Raw DEFLATE payload handling
//!
//! SHC payloads are DEFLATE streams with the zlib header and trailer stripped,
//! so the decompressor runs in raw mode.

use std::io::{self, Write};

use flate2::write::DeflateEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::ShcError;
use crate::models::Segment;

/// Upper bound on inflated payload size
pub const MAX_INFLATED_LEN: usize = 1 << 20;

const GROW_STEP: usize = 16 * 1024;

/// Inflate a raw DEFLATE payload into UTF-8 text
pub fn inflate_payload(compressed: &[u8]) -> Result<String, ShcError> {
    let bytes = inflate_raw(compressed, MAX_INFLATED_LEN).map_err(ShcError::Inflate)?;
    String::from_utf8(bytes).map_err(|source| ShcError::Encoding {
        segment: Segment::Payload,
        source,
    })
}

/// Inflate raw DEFLATE data, refusing output larger than `limit`
///
/// Unlike a `Read` adapter this fails when the stream ends before its final block.
pub fn inflate_raw(compressed: &[u8], limit: usize) -> io::Result<Vec<u8>> {
    let mut inflater = Decompress::new(false);
    // One byte of headroom past the limit distinguishes "exactly at" from "over"
    let ceiling = limit.saturating_add(1);
    let mut out = Vec::with_capacity((compressed.len() * 4).clamp(64, ceiling.max(64)));

    loop {
        if out.len() == out.capacity() {
            if out.len() > limit {
                return Err(too_large(limit));
            }
            out.reserve_exact(GROW_STEP.min(ceiling - out.len()));
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let input = &compressed[in_before as usize..];

        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        match status {
            Status::StreamEnd => {
                if out.len() > limit {
                    return Err(too_large(limit));
                }
                let trailing = compressed.len() - inflater.total_in() as usize;
                if trailing > 0 {
                    tracing::debug!(trailing, "ignoring bytes after end of deflate stream");
                }
                return Ok(out);
            }
            Status::Ok | Status::BufError => {
                let stalled =
                    inflater.total_in() == in_before && inflater.total_out() == out_before;
                if stalled && out.len() < out.capacity() {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "deflate stream ended before its final block",
                    ));
                }
            }
        }
    }
}

fn too_large(limit: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("inflated payload exceeds {} bytes", limit),
    )
}

/// Compress text as a raw DEFLATE stream (no zlib framing)
pub fn deflate_payload(text: &str) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(text.as_bytes())?;
    encoder.finish()
}
