use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum IbcUtilsError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Invalid transfer packet data: {0}")]
    InvalidPacketData(String),

    #[error("Invalid transfer amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: String },
}
