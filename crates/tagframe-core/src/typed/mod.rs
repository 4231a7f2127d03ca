//! Typed - 型付きメッセージ API
//!
//! このモジュールはメッセージ型と tag の対応を型で保証します。
//!
//! # 二層構造
//! - **表層（Typed）**: `Message` trait, `Codec::encode::<M>`, `Handler<M>` - 型安全
//! - **内部（Dyn）**: `DecodedMessage`, `DynHandler` - object-safe, type erasure

pub mod message;
pub mod registry;
pub mod codec;
pub mod set;
pub mod handler;

#[cfg(test)]
pub(crate) mod fixtures;

// 主要な trait/型 を再エクスポート
pub use self::message::{DecodedMessage, Message, MessageHandle};
pub use self::registry::{RegisteredType, TypeRegistry};
pub use self::codec::Codec;
pub use self::set::MessageSet;
pub use self::handler::{DynHandler, Handler, HandlerError, TypedHandler};
