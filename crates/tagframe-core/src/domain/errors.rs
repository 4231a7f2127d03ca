//! Errors - コーデックのエラー型と分類
//!
//! すべての失敗は呼び出し元に型付きで返します。内部でのリトライはしません。

use super::tag::Tag;
use crate::ports::PayloadError;

/// ErrorKind はどの段階で失敗したかの分類
///
/// - Registration: 起動時の設定ミス（重複登録、容量超過、シリアライズ不可）
/// - Encode: 呼び出しごとのエンコード失敗
/// - Decode: 受信フレームの拒否（プロセスを落とす理由にはならない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Registration,
    Encode,
    Decode,
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("message type '{name}' is already registered as {tag}")]
    AlreadyRegistered { name: &'static str, tag: Tag },

    #[error("message type '{name}' cannot be handled by the payload format")]
    NotSerializable {
        name: &'static str,
        #[source]
        source: PayloadError,
    },

    #[error("cannot register '{name}': tag space of {capacity} types is exhausted")]
    CapacityExceeded { name: &'static str, capacity: usize },

    #[error("message type '{name}' is not registered")]
    UnknownType { name: &'static str },

    #[error("failed to serialize '{name}'")]
    SerializationFailed {
        name: &'static str,
        #[source]
        source: PayloadError,
    },

    #[error("malformed frame: {len} bytes, need at least {expected}")]
    MalformedFrame { len: usize, expected: usize },

    #[error("no message type registered for {0}")]
    UnknownTag(Tag),

    #[error("failed to deserialize '{name}' ({tag})")]
    DeserializationFailed {
        tag: Tag,
        name: &'static str,
        #[source]
        source: PayloadError,
    },

    #[error("expected '{expected}' but frame carries '{found}' ({tag})")]
    UnexpectedMessage {
        expected: &'static str,
        found: &'static str,
        tag: Tag,
    },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::AlreadyRegistered { .. }
            | CodecError::NotSerializable { .. }
            | CodecError::CapacityExceeded { .. } => ErrorKind::Registration,
            CodecError::UnknownType { .. } | CodecError::SerializationFailed { .. } => {
                ErrorKind::Encode
            }
            CodecError::MalformedFrame { .. }
            | CodecError::UnknownTag(_)
            | CodecError::DeserializationFailed { .. }
            | CodecError::UnexpectedMessage { .. } => ErrorKind::Decode,
        }
    }

    /// The incoming frame should be dropped as a rejected message.
    pub fn is_rejected_frame(&self) -> bool {
        self.kind() == ErrorKind::Decode
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn decode_errors_are_rejected_frames() {
        let err = CodecError::UnknownTag(Tag::new(255));
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.is_rejected_frame());
        assert_eq!(err.to_string(), "no message type registered for tag-255");
    }

    #[test]
    fn registration_errors_are_not_rejected_frames() {
        let err = CodecError::AlreadyRegistered {
            name: "test.ping",
            tag: Tag::new(0),
        };
        assert_eq!(err.kind(), ErrorKind::Registration);
        assert!(!err.is_rejected_frame());
    }

    #[test]
    fn payload_error_is_kept_as_source() {
        let json_err = serde_json::from_slice::<u32>(b"nope").unwrap_err();
        let err = CodecError::DeserializationFailed {
            tag: Tag::new(1),
            name: "test.pong",
            source: PayloadError::Json(json_err),
        };
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.source().is_some());
    }
}
