//! Frame - `[tag][payload]` のワイヤレイアウト
//!
//! ```text
//! byte 0     : tag (unsigned, little-endian)
//! byte 1..N  : payload (PayloadFormat が定義, フレームの残り全部)
//! ```
//!
//! magic / version / length prefix / terminator はありません。
//! フレーム境界はトランスポート側で区切ってください。

use super::errors::CodecError;
use super::tag::{TAG_WIDTH, Tag};

/// Borrowed view over one encoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    tag: Tag,
    payload: &'a [u8],
}

// parse 済みのフレームは必ず tag を含むので空にならない
#[allow(clippy::len_without_is_empty)]
impl<'a> Frame<'a> {
    /// Split raw bytes into tag and payload.
    ///
    /// An empty payload is valid here; whether it deserializes is up to the format.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, CodecError> {
        let Some((head, payload)) = bytes.split_first_chunk::<TAG_WIDTH>() else {
            return Err(CodecError::MalformedFrame {
                len: bytes.len(),
                expected: TAG_WIDTH,
            });
        };
        Ok(Self {
            tag: Tag::from_le_bytes(*head),
            payload,
        })
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn len(&self) -> usize {
        TAG_WIDTH + self.payload.len()
    }

    /// Append the frame header for `tag` to `out`.
    ///
    /// The encoder writes the payload directly after it, so the header is
    /// the only framing the wire carries.
    pub fn write_header(tag: Tag, out: &mut Vec<u8>) {
        out.extend_from_slice(&tag.to_le_bytes());
    }
}
