pub mod error;
pub mod types;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "evaluation")]
pub mod evaluation;

pub use error::TradeFinError;
pub use types::*;

/// Standard result type for all tradefin-eval operations
pub type TradeFinResult<T> = Result<T, TradeFinError>;
