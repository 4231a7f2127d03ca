//! TypeRegistry - メッセージ型と tag の対応表
//!
//! # ライフサイクル
//! 1. 起動時に `register` で全メッセージ型を登録（mutable, 単一スレッド）
//! 2. `freeze` で `Codec` に変換（以後は登録不可）
//! 3. `Codec` は `Arc` 越しに共有され、ロックなしで並行に読まれる
//!
//! # 学習ポイント
//! - `TypeId` をキーにした型消去されたテーブル
//! - `fn` ポインタによるデコード関数の単相化（`decode_erased::<F, M>`）
//! - Typestate: `freeze(self)` で所有権を奪い、登録を型で禁止する

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::{CodecError, TAG_CAPACITY, Tag};
use crate::impls::JsonFormat;
use crate::ports::{PayloadError, PayloadFormat};

use super::codec::Codec;
use super::message::{DecodedMessage, Message, MessageHandle};

type DecodeFn<F> = fn(&F, Tag, &[u8]) -> Result<DecodedMessage, PayloadError>;

fn decode_erased<F: PayloadFormat, M: Message>(
    format: &F,
    tag: Tag,
    bytes: &[u8],
) -> Result<DecodedMessage, PayloadError> {
    let message: M = format.deserialize(bytes)?;
    Ok(DecodedMessage::new(tag, message))
}

/// One row of the registry.
pub struct RegisteredType<F> {
    tag: Tag,
    name: &'static str,
    type_id: TypeId,
    decode: DecodeFn<F>,
}

impl<F: PayloadFormat> RegisteredType<F> {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn decode(&self, format: &F, payload: &[u8]) -> Result<DecodedMessage, PayloadError> {
        (self.decode)(format, self.tag, payload)
    }
}

impl<F> fmt::Debug for RegisteredType<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredType")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .finish()
    }
}

/// TypeRegistry は具象メッセージ型 ↔ tag の全単射を管理
///
/// # 使用例
/// ```ignore
/// let mut registry = TypeRegistry::new(JsonFormat);
/// registry.register::<Ping>()?;          // tag 0
/// registry.register_handle::<Box<Pong>>()?; // tag 1
/// let codec = registry.freeze();
/// ```
///
/// # 内部実装
/// - `entries[tag]` が tag → 型（tag は密なので Vec の index）
/// - `by_type` が 型 → tag
/// - handle 型は `MessageHandle::Target` で具象型に正規化されるので、
///   別のテーブルは持たない
pub struct TypeRegistry<F: PayloadFormat = JsonFormat> {
    format: F,
    by_type: HashMap<TypeId, Tag>,
    entries: Vec<RegisteredType<F>>,
}

impl<F: PayloadFormat> TypeRegistry<F> {
    pub fn new(format: F) -> Self {
        Self {
            format,
            by_type: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Register `M` and return the tag it was given.
    ///
    /// The tag is the number of types registered before it. Registering the
    /// same type again (in any form) fails and leaves the registry untouched.
    pub fn register<M: Message>(&mut self) -> Result<Tag, CodecError> {
        let type_id = TypeId::of::<M>();
        if let Some(&tag) = self.by_type.get(&type_id) {
            return Err(CodecError::AlreadyRegistered { name: M::NAME, tag });
        }
        let Some(tag) = Tag::from_index(self.entries.len()) else {
            return Err(CodecError::CapacityExceeded {
                name: M::NAME,
                capacity: TAG_CAPACITY,
            });
        };
        self.format
            .probe::<M>()
            .map_err(|source| CodecError::NotSerializable {
                name: M::NAME,
                source,
            })?;

        self.by_type.insert(type_id, tag);
        self.entries.push(RegisteredType {
            tag,
            name: M::NAME,
            type_id,
            decode: decode_erased::<F, M>,
        });
        tracing::debug!(
            name = M::NAME,
            %tag,
            format = self.format.name(),
            "registered message type"
        );
        Ok(tag)
    }

    /// Register through a handle type such as `Box<M>` or `Arc<M>`.
    pub fn register_handle<H: MessageHandle>(&mut self) -> Result<Tag, CodecError> {
        self.register::<H::Target>()
    }

    pub fn tag_of<M: Message>(&self) -> Option<Tag> {
        self.by_type.get(&TypeId::of::<M>()).copied()
    }

    pub fn tag_of_handle<H: MessageHandle>(&self) -> Option<Tag> {
        self.tag_of::<H::Target>()
    }

    pub fn contains<M: Message>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<M>())
    }

    pub fn entry(&self, tag: Tag) -> Option<&RegisteredType<F>> {
        self.entries.get(tag.index())
    }

    /// Entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredType<F>> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(RegisteredType::name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    /// Stop accepting registrations and hand the table to a [`Codec`].
    pub fn freeze(self) -> Codec<F> {
        tracing::debug!(
            types = self.entries.len(),
            format = self.format.name(),
            "registry frozen"
        );
        Codec::new(Arc::new(self))
    }
}

impl<F: PayloadFormat + Default> Default for TypeRegistry<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: PayloadFormat> fmt::Debug for TypeRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("format", &self.format.name())
            .field("entries", &self.entries)
            .finish()
    }
}
