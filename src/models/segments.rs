use std::fmt;

/// Position of a segment within a JWS compact string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// JOSE header (uncompressed JSON)
    Header,
    /// Card payload (raw DEFLATE compressed JSON)
    Payload,
    /// Signature bytes (opaque)
    Signature,
}

impl Segment {
    /// All segments in wire order
    pub const ALL: [Segment; 3] = [Segment::Header, Segment::Payload, Segment::Signature];

    /// Lowercase segment name
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
            Segment::Signature => "signature",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three base64url-decoded parts of a JWS compact string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JwsSegments {
    /// Header bytes (UTF-8 JSON)
    pub header: Vec<u8>,
    /// Payload bytes, still compressed
    pub payload: Vec<u8>,
    /// Raw signature bytes
    pub signature: Vec<u8>,
}

impl JwsSegments {
    /// Borrow the bytes of one segment
    pub fn get(&self, segment: Segment) -> &[u8] {
        match segment {
            Segment::Header => &self.header,
            Segment::Payload => &self.payload,
            Segment::Signature => &self.signature,
        }
    }
}
