//! Codec - 型付きメッセージ ↔ `[tag][payload]` フレームの相互変換
//!
//! # エンコードフロー
//! 1. 型から tag を引く（未登録なら `UnknownType`、シリアライズより先に判定）
//! 2. PayloadFormat で body をシリアライズ
//! 3. tag を 1 byte 書き、その後ろに payload をそのまま連結
//!
//! # デコードフロー
//! 1. 先頭 1 byte を tag として読む（足りなければ `MalformedFrame`）
//! 2. tag から型を引く（未登録なら `UnknownTag`）
//! 3. 残りのバイト列から新しいインスタンスをデシリアライズ
//!
//! 失敗時は `tracing::warn!` を出してからエラーを返します（制御フローは変えない）。

use std::fmt;
use std::sync::Arc;

use crate::domain::{CodecError, Frame, Tag};
use crate::impls::JsonFormat;
use crate::ports::PayloadFormat;

use super::message::{DecodedMessage, Message, MessageHandle};
use super::registry::TypeRegistry;
use super::set::MessageSet;

/// Frozen registry plus the encode/decode paths.
///
/// Cloning is cheap (`Arc`), and all methods take `&self`, so one codec can
/// serve many threads without locking.
pub struct Codec<F: PayloadFormat = JsonFormat> {
    registry: Arc<TypeRegistry<F>>,
}

impl<F: PayloadFormat> Codec<F> {
    pub(crate) fn new(registry: Arc<TypeRegistry<F>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry<F> {
        &self.registry
    }

    pub fn encode<M: Message>(&self, message: &M) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.encode_into(message, &mut out)?;
        Ok(out)
    }

    pub fn encode_handle<H: MessageHandle>(&self, handle: &H) -> Result<Vec<u8>, CodecError> {
        self.encode(handle.message())
    }

    /// Append one frame to `out`.
    ///
    /// On error `out` is restored to its previous length.
    pub fn encode_into<M: Message>(&self, message: &M, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.try_encode_into(message, out).inspect_err(|err| {
            tracing::warn!(name = M::NAME, error = %err, "failed to encode message");
        })
    }

    fn try_encode_into<M: Message>(&self, message: &M, out: &mut Vec<u8>) -> Result<(), CodecError> {
        let tag = self
            .registry
            .tag_of::<M>()
            .ok_or(CodecError::UnknownType { name: M::NAME })?;

        let start = out.len();
        Frame::write_header(tag, out);
        if let Err(source) = self.registry.format().serialize_into(message, out) {
            out.truncate(start);
            return Err(CodecError::SerializationFailed {
                name: M::NAME,
                source,
            });
        }
        Ok(())
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedMessage, CodecError> {
        self.try_decode(bytes).inspect_err(|err| {
            tracing::warn!(len = bytes.len(), error = %err, "failed to decode frame");
        })
    }

    fn try_decode(&self, bytes: &[u8]) -> Result<DecodedMessage, CodecError> {
        let frame = Frame::parse(bytes)?;
        let tag = frame.tag();
        let entry = self.registry.entry(tag).ok_or(CodecError::UnknownTag(tag))?;
        entry
            .decode(self.registry.format(), frame.payload())
            .map_err(|source| CodecError::DeserializationFailed {
                tag,
                name: entry.name(),
                source,
            })
    }

    /// Decode a frame that must carry `M`.
    pub fn decode_as<M: Message>(&self, bytes: &[u8]) -> Result<M, CodecError> {
        self.decode(bytes)?.downcast::<M>().map_err(|other| {
            let err = CodecError::UnexpectedMessage {
                expected: M::NAME,
                found: other.name(),
                tag: other.tag(),
            };
            tracing::warn!(error = %err, "decoded frame has unexpected type");
            err
        })
    }

    /// Decode into a [`MessageSet`] enum.
    pub fn decode_set<S: MessageSet>(&self, bytes: &[u8]) -> Result<S, CodecError> {
        let decoded = self.decode(bytes)?;
        S::from_decoded(decoded).map_err(|other| {
            let err = CodecError::UnexpectedMessage {
                expected: S::NAME,
                found: other.name(),
                tag: other.tag(),
            };
            tracing::warn!(error = %err, "decoded frame is outside the message set");
            err
        })
    }

    /// Read the tag of a frame without touching the payload.
    pub fn peek_tag(&self, bytes: &[u8]) -> Result<Tag, CodecError> {
        self.try_peek_tag(bytes).inspect_err(|err| {
            tracing::warn!(len = bytes.len(), error = %err, "rejected frame before decoding");
        })
    }

    fn try_peek_tag(&self, bytes: &[u8]) -> Result<Tag, CodecError> {
        let tag = Frame::parse(bytes)?.tag();
        if self.registry.entry(tag).is_none() {
            return Err(CodecError::UnknownTag(tag));
        }
        Ok(tag)
    }
}

impl<F: PayloadFormat> Clone for Codec<F> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<F: PayloadFormat> fmt::Debug for Codec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("registry", &self.registry)
            .finish()
    }
}
