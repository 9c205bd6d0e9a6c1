use thiserror::Error;

pub type RtdResult<T> = Result<T, RtdError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RtdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

impl RtdError {
    pub fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidConfiguration { what: what.into() }
    }
}
