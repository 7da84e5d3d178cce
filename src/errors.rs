use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("Invalid input")]
    InvalidInput,
    #[error("Malformed numeric input: {0:?}")]
    MalformedNumericInput(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
