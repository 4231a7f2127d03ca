//! Domain model (tags, frames, errors).

pub mod tag;
pub mod frame;
pub mod errors;

pub use self::tag::{TAG_CAPACITY, TAG_WIDTH, Tag};
pub use self::frame::Frame;
pub use self::errors::{CodecError, ErrorKind, Result};
