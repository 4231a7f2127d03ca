//! Impls - PayloadFormat の実装
//!
//! - `JsonFormat`: serde_json（デフォルト）
//! - `MsgPackFormat`: rmp-serde（バイナリ、struct-as-map）

pub mod json;
pub mod msgpack;

pub use self::json::JsonFormat;
pub use self::msgpack::MsgPackFormat;
