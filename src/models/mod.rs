/// Decoded card and its JOSE header view
pub mod card;
/// JWS segment names and their decoded bytes
pub mod segments;

pub use card::{DecodedCard, JoseHeader};
pub use segments::{JwsSegments, Segment};
