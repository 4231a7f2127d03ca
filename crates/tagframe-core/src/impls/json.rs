//! JsonFormat - `serde_json` による payload
//!
//! デフォルトの形式です。人が読めるのでデバッグしやすい反面、
//! フィールド名の分だけ大きくなります。

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::{PayloadError, PayloadFormat};

/// JSON payload format.
///
/// The payload must end where the value ends. `serde_json::from_slice`
/// rejects trailing non-whitespace on its own; trailing whitespace is
/// rejected here as [`PayloadError::TrailingBytes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl PayloadFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    #[inline]
    fn serialize_into<T>(&self, value: &T, out: &mut Vec<u8>) -> Result<(), PayloadError>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_writer(out, value)?;
        Ok(())
    }

    #[inline]
    fn deserialize<T>(&self, bytes: &[u8]) -> Result<T, PayloadError>
    where
        T: DeserializeOwned,
    {
        let value = serde_json::from_slice(bytes)?;

        // 完全な JSON 値は空白で終わらない
        let trailing = bytes
            .iter()
            .rev()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        if trailing > 0 {
            return Err(PayloadError::TrailingBytes {
                consumed: bytes.len() - trailing,
                len: bytes.len(),
            });
        }
        Ok(value)
    }
}
