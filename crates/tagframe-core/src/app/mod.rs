//! App - 起動時のワイヤリングとディスパッチ
//!
//! - builder: 登録 → 検証 → 凍結（`Codec`）
//! - router: tag ごとの Handler 呼び出し

pub mod builder;
pub mod router;

pub use self::builder::{BuildError, CodecBuilder};
pub use self::router::{RouteError, Router};
