//! PayloadFormat port - 外部シリアライザとの境界
//!
//! コーデックはフィールドのバイナリレイアウトを自前で持ちません。
//! 次の 3 つを満たす形式なら差し替え可能です:
//! - シリアライズ可能かどうかの判定（`probe`）
//! - `serialize(value) -> bytes`
//! - `deserialize(bytes) -> value`
//!
//! payload はフレームの残り全部を占めるので、実装は末尾の余りバイトを
//! エラーにしなければなりません。

use serde::Serialize;
use serde::de::DeserializeOwned;

/// PayloadError は下層シリアライザのエラーをそのまま保持
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    #[error("payload has {} trailing bytes after a complete value", .len - .consumed)]
    TrailingBytes { consumed: usize, len: usize },
}

/// PayloadFormat は message body のシリアライズ方式
///
/// Generic methods keep this trait off the `dyn` path; registries are
/// parameterized over the format instead.
pub trait PayloadFormat: Send + Sync + 'static {
    /// Short identifier for logs (`"json"`, `"msgpack"`).
    fn name(&self) -> &'static str;

    /// Append the serialized form of `value` to `out`.
    ///
    /// On error `out` may hold a partial write; callers roll it back.
    fn serialize_into<T>(&self, value: &T, out: &mut Vec<u8>) -> Result<(), PayloadError>
    where
        T: Serialize + ?Sized;

    /// Deserialize exactly `bytes` into a fresh value.
    fn deserialize<T>(&self, bytes: &[u8]) -> Result<T, PayloadError>
    where
        T: DeserializeOwned;

    fn serialize<T>(&self, value: &T) -> Result<Vec<u8>, PayloadError>
    where
        T: Serialize + ?Sized,
    {
        let mut out = Vec::new();
        self.serialize_into(value, &mut out)?;
        Ok(out)
    }

    /// Capability check: the zero value of `T` must survive a round trip.
    fn probe<T>(&self) -> Result<(), PayloadError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let bytes = self.serialize(&T::default())?;
        self.deserialize::<T>(&bytes).map(|_| ())
    }
}
