//! Message trait - 登録可能なメッセージ型の定義
//!
//! # 学習ポイント
//! - Associated Constants (`const NAME`)
//! - `TypeId` による型の同一性（ランタイムの型マップを持たない）
//! - Handle（`Box<M>`, `Arc<M>` など）は `MessageHandle::Target` で
//!   コンパイル時に具象型へ正規化される
//! - Type erasure: `Box<dyn Any + Send + Sync>` → `DecodedMessage` の checked downcast
//!   （失敗時は値をそのまま返す）

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::Tag;

/// Message は tag を割り当てられるメッセージ型
///
/// # 使用例
/// ```
/// use serde::{Deserialize, Serialize};
/// use tagframe_core::typed::Message;
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Ping {
///     id: i64,
/// }
///
/// impl Message for Ping {
///     const NAME: &'static str = "demo.ping";
/// }
/// ```
///
/// # Trait Bounds
/// - `Serialize` / `DeserializeOwned`: PayloadFormat に渡すため
/// - `Default`: デコード時のゼロ値と、登録時の capability check のため
/// - `Send + Sync + 'static`: 凍結後のレジストリを複数スレッドで共有するため
pub trait Message:
    Serialize + DeserializeOwned + Default + fmt::Debug + Send + Sync + 'static
{
    /// Human-readable name used in logs, errors and builder expectations.
    ///
    /// Not sent on the wire; the tag is.
    const NAME: &'static str;
}

/// MessageHandle は メッセージへの参照的なラッパー
///
/// 呼び出し側は通常コピーではなく handle を持っているので、
/// handle 経由でも値と同じ tag に解決される必要があります。
pub trait MessageHandle {
    type Target: Message;

    fn message(&self) -> &Self::Target;
}

impl<M: Message> MessageHandle for Box<M> {
    type Target = M;

    fn message(&self) -> &M {
        self
    }
}

impl<M: Message> MessageHandle for Arc<M> {
    type Target = M;

    fn message(&self) -> &M {
        self
    }
}

impl<M: Message> MessageHandle for Rc<M> {
    type Target = M;

    fn message(&self) -> &M {
        self
    }
}

impl<M: Message> MessageHandle for &M {
    type Target = M;

    fn message(&self) -> &M {
        self
    }
}

/// A decoded frame: the tag it arrived with plus the reconstructed message.
///
/// The decoder cannot know which type the caller expects, so the value is
/// type-erased. Use [`DecodedMessage::downcast`] or a
/// [`MessageSet`](crate::typed::MessageSet) to get a concrete type back.
pub struct DecodedMessage {
    tag: Tag,
    name: &'static str,
    message: Box<dyn Any + Send + Sync>,
    // 型消去後も Debug 出力できるよう、具象型で単相化した関数を持つ
    fmt_message: fn(&(dyn Any + Send + Sync), &mut fmt::Formatter<'_>) -> fmt::Result,
}

fn fmt_erased<M: Message>(
    message: &(dyn Any + Send + Sync),
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match message.downcast_ref::<M>() {
        Some(message) => fmt::Debug::fmt(message, f),
        None => f.write_str(M::NAME),
    }
}

impl DecodedMessage {
    pub(crate) fn new<M: Message>(tag: Tag, message: M) -> Self {
        Self {
            tag,
            name: M::NAME,
            message: Box::new(message),
            fmt_message: fmt_erased::<M>,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self.message.as_ref()
    }

    pub fn is<M: Message>(&self) -> bool {
        self.message.is::<M>()
    }

    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.message.downcast_ref::<M>()
    }

    /// Take the concrete message out, or get `self` back if it is another type.
    pub fn downcast<M: Message>(self) -> Result<M, Self> {
        let Self {
            tag,
            name,
            message,
            fmt_message,
        } = self;
        match message.downcast::<M>() {
            Ok(message) => Ok(*message),
            Err(message) => Err(Self {
                tag,
                name,
                message,
                fmt_message,
            }),
        }
    }

    pub fn into_any(self) -> Box<dyn Any + Send + Sync> {
        self.message
    }
}

impl fmt::Debug for DecodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Erased<'a>(&'a DecodedMessage);

        impl fmt::Debug for Erased<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                (self.0.fmt_message)(self.0.message.as_ref(), f)
            }
        }

        f.debug_struct("DecodedMessage")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("message", &Erased(self))
            .finish()
    }
}
