pub mod error;
pub mod installment;
pub mod presets;
pub mod schedule;
pub mod types;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all emi-core operations
pub type EmiResult<T> = Result<T, EmiError>;
