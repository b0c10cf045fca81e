pub mod assumptions;
pub mod error;
pub mod ratios;
pub mod types;

#[cfg(feature = "seasonal")]
pub mod seasonal;

#[cfg(feature = "base_model")]
pub mod base_model;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "model")]
pub mod model;

pub use error::InvestError;
pub use types::*;

/// Standard result type for all str-invest operations
pub type InvestResult<T> = Result<T, InvestError>;
