use thiserror::Error;

pub type TccResult<T> = Result<T, TccError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TccError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
