//! Router - フレームの tag で Handler に振り分ける
//!
//! Design:
//! - Built during initialization (mutable, `route` consumes and returns self).
//! - Used during runtime (immutable, `dispatch` takes `&self`).
//! This avoids locks; share it behind an `Arc` if several tasks dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{CodecError, Tag};
use crate::impls::JsonFormat;
use crate::ports::PayloadFormat;
use crate::typed::{Codec, DynHandler, Handler, HandlerError, Message, TypedHandler};

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("duplicate handler for message '{name}'")]
    DuplicateHandler { name: &'static str },

    #[error("handler not found for '{name}' ({tag})")]
    HandlerNotFound { tag: Tag, name: &'static str },

    #[error("handler for '{name}' failed")]
    Handler {
        name: &'static str,
        #[source]
        source: HandlerError,
    },
}

/// Router decodes frames and hands each message to the handler for its tag.
pub struct Router<F: PayloadFormat = JsonFormat> {
    codec: Codec<F>,
    handlers: HashMap<Tag, Arc<dyn DynHandler>>,
}

impl<F: PayloadFormat> Router<F> {
    pub fn new(codec: Codec<F>) -> Self {
        Self {
            codec,
            handlers: HashMap::new(),
        }
    }

    /// Route `M` to `handler`.
    ///
    /// `M` must already be registered in the codec; one handler per message type.
    pub fn route<M, H>(mut self, handler: H) -> Result<Self, RouteError>
    where
        M: Message,
        H: Handler<M> + 'static,
    {
        let tag = self
            .codec
            .registry()
            .tag_of::<M>()
            .ok_or(CodecError::UnknownType { name: M::NAME })?;
        if self.handlers.contains_key(&tag) {
            return Err(RouteError::DuplicateHandler { name: M::NAME });
        }
        self.handlers
            .insert(tag, Arc::new(TypedHandler::<M, H>::new(handler)));
        Ok(self)
    }

    pub fn codec(&self) -> &Codec<F> {
        &self.codec
    }

    /// Names of routed messages in tag order.
    pub fn routed_messages(&self) -> Vec<&'static str> {
        let mut routed: Vec<(&Tag, &Arc<dyn DynHandler>)> = self.handlers.iter().collect();
        routed.sort_by_key(|(tag, _)| **tag);
        routed
            .into_iter()
            .map(|(_, handler)| handler.message_name())
            .collect()
    }

    /// Decode one frame and run its handler. Returns the tag that was handled.
    ///
    /// The handler is looked up before the payload is deserialized, so frames
    /// nobody listens for are rejected without decoding them.
    pub async fn dispatch(&self, frame: &[u8]) -> Result<Tag, RouteError> {
        let tag = self.codec.peek_tag(frame)?;
        let Some(handler) = self.handlers.get(&tag) else {
            let name = self
                .codec
                .registry()
                .entry(tag)
                .map_or("<unregistered>", |entry| entry.name());
            tracing::warn!(%tag, name, "no handler for message");
            return Err(RouteError::HandlerNotFound { tag, name });
        };

        let decoded = self.codec.decode(frame)?;
        tracing::debug!(%tag, name = decoded.name(), "dispatching message");
        handler.handle_dyn(decoded).await.map_err(|source| {
            tracing::warn!(%tag, error = %source, "handler failed");
            RouteError::Handler {
                name: handler.message_name(),
                source,
            }
        })?;
        Ok(tag)
    }
}
