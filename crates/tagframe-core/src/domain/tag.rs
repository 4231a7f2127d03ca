//! Tag - フレーム先頭の 1 byte 識別子
//!
//! 登録順に 0 から密に割り当てられます。
//! 型名やハッシュではなく小さな整数なので、1 メッセージあたりの
//! オーバーヘッドは 1 byte です。

use std::fmt;

/// Number of bytes the tag occupies at the front of every frame.
pub const TAG_WIDTH: usize = 1;

/// Number of distinct message types a registry can hold.
pub const TAG_CAPACITY: usize = 1 << (8 * TAG_WIDTH);

/// Tag は登録済みメッセージ型の識別子
///
/// 同じワイヤ形式を共有するプロセスは、同じ順序で型を登録する必要があります。
/// 順序が違えば同じ tag が別の型を指します。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u8);

impl Tag {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Tag for the `index`-th registration, or `None` once the tag space is exhausted.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().map(Self)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn to_le_bytes(self) -> [u8; TAG_WIDTH] {
        self.0.to_le_bytes()
    }

    pub const fn from_le_bytes(bytes: [u8; TAG_WIDTH]) -> Self {
        Self(u8::from_le_bytes(bytes))
    }
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag-{}", self.0)
    }
}
