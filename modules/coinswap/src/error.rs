use cosmwasm_std::{
    ConversionOverflowError, DivideByZeroError, OverflowError, StdError, Uint128,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoinswapError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    #[error("{0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("No funded pool exists for {denom}")]
    PoolNotFound { denom: String },

    #[error("Pools cannot be created for {denom}")]
    PoolNotWhitelisted { denom: String },

    #[error("{denom} is not a liquidity token")]
    UnknownLiquidityDenom { denom: String },

    #[error("Swapping {amount}{denom} exceeds the risk limit of {limit}{denom}")]
    RiskLimitExceeded {
        denom: String,
        amount: Uint128,
        limit: Uint128,
    },

    #[error("Insufficient liquidity: {reason}")]
    InsufficientLiquidity { reason: String },

    #[error("Double swaps from {input} to {output} are disabled")]
    DoubleSwapDisabled { input: String, output: String },

    #[error("Cannot swap {denom} for itself")]
    InvalidSwapPair { denom: String },

    #[error("Liquidity cannot be provided in the native denom {denom}")]
    InvalidLiquidityDenom { denom: String },

    #[error("Native reserve of pool {denom} would reach {reserve}, above the cap of {cap}")]
    MaxNativeReserveExceeded {
        denom: String,
        reserve: Uint128,
        cap: Uint128,
    },

    #[error("Constraint not met: {reason}")]
    ConstraintNotMet { reason: String },

    #[error("Amount must be greater than zero")]
    ZeroAmount {},

    #[error("Insufficient funds: {address} can spend {available}{denom}, {required}{denom} required")]
    InsufficientFunds {
        address: String,
        denom: String,
        available: Uint128,
        required: Uint128,
    },
}
