use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("No token pair is registered for {denom}")]
    PairNotFound { denom: String },

    #[error("Token pair for {denom} is disabled")]
    PairDisabled { denom: String },

    #[error("Invalid conversion receiver {receiver}")]
    InvalidReceiver { receiver: String },

    #[error("Conversion amount must be greater than zero")]
    ZeroAmount {},
}
