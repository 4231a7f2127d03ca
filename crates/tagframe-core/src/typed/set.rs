//! MessageSet - 登録済みメッセージの直和型
//!
//! `DecodedMessage` を毎回 downcast する代わりに、enum で pattern match できます。
//! `message_set!` で宣言した順序がそのまま登録順（= tag）になるので、
//! 同じ enum を共有するプロセス同士はワイヤ互換です。

use crate::domain::CodecError;
use crate::ports::PayloadFormat;

use super::codec::Codec;
use super::message::DecodedMessage;
use super::registry::TypeRegistry;

/// A closed set of message types, usually generated by [`message_set!`](crate::message_set).
pub trait MessageSet: Sized {
    /// Name of the set, reported in `UnexpectedMessage` errors.
    const NAME: &'static str;

    /// Register every member in declaration order.
    fn register_all<F: PayloadFormat>(registry: &mut TypeRegistry<F>) -> Result<(), CodecError>;

    fn from_decoded(decoded: DecodedMessage) -> Result<Self, DecodedMessage>;

    fn encode_with<F: PayloadFormat>(&self, codec: &Codec<F>) -> Result<Vec<u8>, CodecError>;
}

/// Declare an enum over message types and implement [`MessageSet`](crate::typed::MessageSet) for it.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use tagframe_core::impls::JsonFormat;
/// use tagframe_core::message_set;
/// use tagframe_core::typed::{Message, MessageSet, TypeRegistry};
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// struct Ping { id: i64 }
/// impl Message for Ping { const NAME: &'static str = "demo.ping"; }
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// struct Pong { id: i64 }
/// impl Message for Pong { const NAME: &'static str = "demo.pong"; }
///
/// message_set! {
///     #[derive(Debug, PartialEq)]
///     pub enum Wire {
///         Ping(Ping),
///         Pong(Pong),
///     }
/// }
///
/// let mut registry = TypeRegistry::new(JsonFormat);
/// Wire::register_all(&mut registry).unwrap();
/// let codec = registry.freeze();
///
/// let bytes = Wire::Pong(Pong { id: 2 }).encode_with(&codec).unwrap();
/// assert_eq!(bytes[0], 1);
/// match codec.decode_set::<Wire>(&bytes).unwrap() {
///     Wire::Pong(pong) => assert_eq!(pong.id, 2),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[macro_export]
macro_rules! message_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant($ty), )+
        }

        $(
            impl ::std::convert::From<$ty> for $name {
                fn from(message: $ty) -> Self {
                    $name::$variant(message)
                }
            }
        )+

        impl $crate::typed::MessageSet for $name {
            const NAME: &'static str = ::std::stringify!($name);

            fn register_all<F: $crate::ports::PayloadFormat>(
                registry: &mut $crate::typed::TypeRegistry<F>,
            ) -> ::std::result::Result<(), $crate::domain::CodecError> {
                $( registry.register::<$ty>()?; )+
                ::std::result::Result::Ok(())
            }

            fn from_decoded(
                decoded: $crate::typed::DecodedMessage,
            ) -> ::std::result::Result<Self, $crate::typed::DecodedMessage> {
                $(
                    let decoded = match decoded.downcast::<$ty>() {
                        ::std::result::Result::Ok(message) => {
                            return ::std::result::Result::Ok($name::$variant(message));
                        }
                        ::std::result::Result::Err(other) => other,
                    };
                )+
                ::std::result::Result::Err(decoded)
            }

            fn encode_with<F: $crate::ports::PayloadFormat>(
                &self,
                codec: &$crate::typed::Codec<F>,
            ) -> ::std::result::Result<::std::vec::Vec<u8>, $crate::domain::CodecError> {
                match self {
                    $( $name::$variant(message) => codec.encode(message), )+
                }
            }
        }
    };
}
