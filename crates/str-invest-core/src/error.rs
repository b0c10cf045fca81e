use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvestError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for InvestError {
    fn from(e: serde_json::Error) -> Self {
        InvestError::SerializationError(e.to_string())
    }
}
