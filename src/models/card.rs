use serde::Deserialize;

/// A decoded SMART Health Card
///
/// Produced once per successful decode and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCard {
    header: String,
    payload: String,
    signature: Vec<u8>,
}

impl DecodedCard {
    pub(crate) fn new(header: String, payload: String, signature: Vec<u8>) -> Self {
        Self {
            header,
            payload,
            signature,
        }
    }

    /// JOSE header as JSON text
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Inflated payload as JSON text
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Raw signature bytes (ES256 signatures are 64 bytes)
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Signature rendered as lowercase hex
    pub fn signature_hex(&self) -> String {
        hex::encode(&self.signature)
    }

    /// Typed view over the well-known header fields
    pub fn jose_header(&self) -> Result<JoseHeader, serde_json::Error> {
        serde_json::from_str(&self.header)
    }

    /// Parse the header text as JSON
    pub fn header_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.header)
    }

    /// Parse the payload text as JSON
    pub fn payload_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.payload)
    }

    /// Consume the card, returning (header, payload, signature)
    pub fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.header, self.payload, self.signature)
    }
}

/// Well-known JOSE header fields used by SMART Health Cards
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoseHeader {
    /// Signature algorithm, `ES256` for SHC
    pub alg: Option<String>,
    /// Compression marker, `DEF` for raw DEFLATE payloads
    pub zip: Option<String>,
    /// Issuer key id (JWK thumbprint)
    pub kid: Option<String>,
}

impl JoseHeader {
    /// True when the header declares a DEFLATE-compressed payload
    pub fn is_deflated(&self) -> bool {
        self.zip.as_deref() == Some("DEF")
    }
}
