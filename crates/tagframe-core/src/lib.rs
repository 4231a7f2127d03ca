//! tagframe-core
//!
//! Self-describing message codec. Each registered message type gets a dense
//! one-byte tag; a frame is that tag followed by the serde payload, so the
//! receiver can rebuild the typed message from the bytes alone.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（tag, frame, errors）
//! - **ports**: 外部シリアライザの抽象化（PayloadFormat）
//! - **impls**: 実装（JsonFormat, MsgPackFormat）
//! - **typed**: 型付き API（Message, TypeRegistry, Codec, MessageSet, Handler）
//! - **app**: 起動時のワイヤリング（CodecBuilder, Router）
//!
//! # 例
//! ```
//! use serde::{Deserialize, Serialize};
//! use tagframe_core::impls::JsonFormat;
//! use tagframe_core::typed::{Message, TypeRegistry};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Ping { id: i64 }
//! impl Message for Ping { const NAME: &'static str = "demo.ping"; }
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Pong { id: i64 }
//! impl Message for Pong { const NAME: &'static str = "demo.pong"; }
//!
//! let mut registry = TypeRegistry::new(JsonFormat);
//! registry.register::<Ping>()?;
//! registry.register::<Pong>()?;
//! let codec = registry.freeze();
//!
//! let bytes = codec.encode(&Ping { id: 7 })?;
//! assert_eq!(bytes[0], 0x00);
//! assert_eq!(&bytes[1..], br#"{"id":7}"#);
//!
//! let decoded = codec.decode(&bytes)?;
//! assert_eq!(decoded.downcast::<Ping>().ok(), Some(Ping { id: 7 }));
//! # Ok::<(), tagframe_core::domain::CodecError>(())
//! ```
//!
//! Registration order is part of the wire format: peers must register the
//! same types in the same order.

pub mod domain;
pub mod ports;
pub mod impls;
pub mod typed;
pub mod app;

pub use crate::app::{BuildError, CodecBuilder, RouteError, Router};
pub use crate::domain::{CodecError, ErrorKind, Frame, Tag};
pub use crate::impls::{JsonFormat, MsgPackFormat};
pub use crate::ports::{PayloadError, PayloadFormat};
pub use crate::typed::{Codec, DecodedMessage, Handler, Message, MessageHandle, MessageSet, TypeRegistry};
