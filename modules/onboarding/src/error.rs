use cosmwasm_std::StdError;
use thiserror::Error;
use valence_ibc_utils::IbcUtilsError;

#[derive(Error, Debug, PartialEq)]
pub enum OnboardingError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Packet(#[from] IbcUtilsError),

    #[error("Auto swap threshold must be greater than zero")]
    ZeroThreshold {},

    #[error("Channel {channel} is whitelisted more than once")]
    DuplicateChannel { channel: String },

    #[error("Invalid channel identifier: {channel}")]
    InvalidChannel { channel: String },
}
