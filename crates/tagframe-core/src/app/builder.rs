//! CodecBuilder - 起動時のコーデック構築
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use crate::domain::CodecError;
use crate::impls::JsonFormat;
use crate::ports::PayloadFormat;
use crate::typed::{Codec, Message, MessageHandle, MessageSet, TypeRegistry};

/// CodecBuilder は登録から凍結までをまとめる
///
/// # 使用例
/// ```
/// # use serde::{Deserialize, Serialize};
/// # use tagframe_core::typed::Message;
/// # #[derive(Debug, Default, Serialize, Deserialize)]
/// # struct Ping { id: i64 }
/// # impl Message for Ping { const NAME: &'static str = "demo.ping"; }
/// use tagframe_core::app::CodecBuilder;
///
/// let codec = CodecBuilder::new()
///     .register::<Ping>()?
///     .expect_messages(&["demo.ping"])
///     .build()?;
/// assert_eq!(codec.registry().len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Fail-fast 設計
/// - expect_messages() で期待されるメッセージ名を登録
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - 不足があれば BuildError を返す
pub struct CodecBuilder<F: PayloadFormat = JsonFormat> {
    registry: TypeRegistry<F>,
    expected: Option<Vec<String>>,
}

/// BuildError はコーデック構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing message types: {0:?}. These messages were expected but not registered.")]
    MissingMessages(Vec<String>),
}

impl CodecBuilder<JsonFormat> {
    pub fn new() -> Self {
        Self::with_format(JsonFormat)
    }
}

impl Default for CodecBuilder<JsonFormat> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PayloadFormat> CodecBuilder<F> {
    pub fn with_format(format: F) -> Self {
        Self {
            registry: TypeRegistry::new(format),
            expected: None,
        }
    }

    pub fn register<M: Message>(mut self) -> Result<Self, CodecError> {
        self.registry.register::<M>()?;
        Ok(self)
    }

    pub fn register_handle<H: MessageHandle>(mut self) -> Result<Self, CodecError> {
        self.registry.register_handle::<H>()?;
        Ok(self)
    }

    pub fn register_set<S: MessageSet>(mut self) -> Result<Self, CodecError> {
        S::register_all(&mut self.registry)?;
        Ok(self)
    }

    /// Names (`Message::NAME`) that must be registered by the time `build` runs.
    pub fn expect_messages(mut self, names: &[&str]) -> Self {
        self.expected = Some(names.iter().map(|name| name.to_string()).collect());
        self
    }

    /// 期待されたメッセージが全て登録済みか検証してから凍結する
    pub fn build(self) -> Result<Codec<F>, BuildError> {
        if let Some(expected) = &self.expected {
            let registered = self.registry.names();
            let missing: Vec<String> = expected
                .iter()
                .filter(|name| !registered.iter().any(|r| *r == name.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                tracing::warn!(?missing, "codec build is missing expected messages");
                return Err(BuildError::MissingMessages(missing));
            }
        }
        Ok(self.registry.freeze())
    }
}
