//! MsgPackFormat - `rmp-serde` による payload
//!
//! struct は map（フィールド名付き）でエンコードします。
//! 位置ベースの配列より数バイト大きくなりますが、フィールドの並び替えに強く、
//! 他言語の MessagePack 実装とも互換です。
//!
//! # Example
//!
//! ```
//! use tagframe_core::impls::MsgPackFormat;
//! use tagframe_core::ports::PayloadFormat;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Ping {
//!     id: u8,
//! }
//!
//! let bytes = MsgPackFormat.serialize(&Ping { id: 7 }).unwrap();
//! assert_eq!(bytes, [0x81, 0xa2, b'i', b'd', 0x07]);
//! let back: Ping = MsgPackFormat.deserialize(&bytes).unwrap();
//! assert_eq!(back, Ping { id: 7 });
//! ```

use std::io::Cursor;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::{PayloadError, PayloadFormat};

/// MessagePack payload format (struct-as-map).
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackFormat;

impl PayloadFormat for MsgPackFormat {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    #[inline]
    fn serialize_into<T>(&self, value: &T, out: &mut Vec<u8>) -> Result<(), PayloadError>
    where
        T: Serialize + ?Sized,
    {
        rmp_serde::encode::write_named(out, value)?;
        Ok(())
    }

    fn deserialize<T>(&self, bytes: &[u8]) -> Result<T, PayloadError>
    where
        T: DeserializeOwned,
    {
        let mut cursor = Cursor::new(bytes);
        let value = rmp_serde::decode::from_read(&mut cursor)?;
        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(PayloadError::TrailingBytes {
                consumed,
                len: bytes.len(),
            });
        }
        Ok(value)
    }
}
