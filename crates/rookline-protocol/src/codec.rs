//! Codec trait and the JSON implementation.
//!
//! The server never calls `serde_json` directly. It holds something that
//! implements [`Codec`] and hands it commands to decode and messages to
//! encode, so the wire format stays a single swappable piece.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts between Rust values and raw frame bytes.
///
/// `Send + Sync + 'static` because one codec is shared by every
/// connection task the server spawns.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or
    /// don't match the expected shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Like [`decode`](Codec::decode), but rejects frames over `limit`
    /// bytes before parsing them.
    ///
    /// # Errors
    /// Returns `ProtocolError::TooLarge` for oversized frames, otherwise
    /// whatever `decode` returns.
    fn decode_bounded<T: DeserializeOwned>(
        &self,
        data: &[u8],
        limit: usize,
    ) -> Result<T, ProtocolError> {
        if data.len() > limit {
            return Err(ProtocolError::TooLarge {
                size: data.len(),
                limit,
            });
        }
        self.decode(data)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use rookline_protocol::{ClientCommand, Codec, CommandType, GameId, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&ClientCommand::connect("token", GameId(7))).unwrap();
///
/// let decoded: ClientCommand = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded.command_type, CommandType::Connect);
/// assert_eq!(decoded.game_id, GameId(7));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
