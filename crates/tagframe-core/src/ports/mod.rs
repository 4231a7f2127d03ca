//! Ports - 外部コラボレータの抽象化
//!
//! 現在は payload のシリアライザのみ。実装は `impls` にあります。

pub mod payload_format;

pub use self::payload_format::{PayloadError, PayloadFormat};
