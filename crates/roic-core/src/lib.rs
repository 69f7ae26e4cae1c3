pub mod error;
pub mod roic;
pub mod statements;
pub mod types;

#[cfg(feature = "industry")]
pub mod industry;

#[cfg(feature = "trend")]
pub mod trend;

pub use error::RoicError;
pub use types::*;

/// Standard result type for all roic-core operations
pub type RoicResult<T> = Result<T, RoicError>;
