//! Handler trait - デコード済みメッセージを処理する Handler の定義
//!
//! # 学習ポイント
//! - ジェネリック trait (Handler<M>)
//! - Object-safe trait (DynHandler)
//! - Type erasure パターン (TypedHandler<M, H> → DynHandler)

use std::marker::PhantomData;

use async_trait::async_trait;

use super::message::{DecodedMessage, Message};

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),

    #[error("handler for '{expected}' received '{found}'")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl HandlerError {
    pub fn failed(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into())
    }
}

/// Handler は メッセージを受け取って処理する
///
/// # 使用例
/// ```ignore
/// struct PingHandler;
///
/// #[async_trait]
/// impl Handler<Ping> for PingHandler {
///     async fn handle(&self, ping: Ping) -> Result<(), HandlerError> {
///         println!("ping {}", ping.id);
///         Ok(())
///     }
/// }
/// ```
///
/// - `Handler<Ping>` は `Ping` しか受け取れない
/// - どの tag に紐づくかは Router が型から解決する
#[async_trait]
pub trait Handler<M: Message>: Send + Sync {
    async fn handle(&self, message: M) -> Result<(), HandlerError>;
}

/// DynHandler は object-safe な Handler の抽象化
///
/// TypedHandler<M, H> を DynHandler に変換することで、
/// HashMap<Tag, Arc<dyn DynHandler>> に格納可能にします。
#[async_trait]
pub trait DynHandler: Send + Sync {
    async fn handle_dyn(&self, decoded: DecodedMessage) -> Result<(), HandlerError>;
    fn message_name(&self) -> &'static str;
}

pub struct TypedHandler<M: Message, H: Handler<M>> {
    handler: H,
    _marker: PhantomData<fn(M)>,
}

impl<M: Message, H: Handler<M>> TypedHandler<M, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<M: Message, H: Handler<M>> DynHandler for TypedHandler<M, H> {
    async fn handle_dyn(&self, decoded: DecodedMessage) -> Result<(), HandlerError> {
        let message = decoded
            .downcast::<M>()
            .map_err(|other| HandlerError::Mismatch {
                expected: M::NAME,
                found: other.name(),
            })?;
        self.handler.handle(message).await
    }

    fn message_name(&self) -> &'static str {
        M::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use crate::typed::fixtures::{Ping, Pong};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl Handler<Ping> for RecordingHandler {
        async fn handle(&self, ping: Ping) -> Result<(), HandlerError> {
            self.seen.lock().unwrap().push(ping.id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn typed_handler_receives_concrete_message() {
        let typed = TypedHandler::<Ping, _>::new(RecordingHandler::default());
        let decoded = DecodedMessage::new(Tag::new(0), Ping { id: 4 });

        typed.handle_dyn(decoded).await.unwrap();
        assert_eq!(typed.message_name(), "test.ping");
        assert_eq!(*typed.handler.seen.lock().unwrap(), vec![4]);
    }

    #[tokio::test]
    async fn typed_handler_rejects_other_message() {
        let typed = TypedHandler::<Ping, _>::new(RecordingHandler::default());
        let decoded = DecodedMessage::new(Tag::new(1), Pong { id: 4 });

        let err = typed.handle_dyn(decoded).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Mismatch {
                expected: "test.ping",
                found: "test.pong"
            }
        ));
        assert!(typed.handler.seen.lock().unwrap().is_empty());
    }
}
