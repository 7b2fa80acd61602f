use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Uint128};

/// A single-hop trade between the native asset and one pooled denomination.
///
/// For exact-output trades `input` is the most the payer is willing to spend
/// and `output` the exact amount wanted. For exact-input trades `input` is
/// spent in full and `output` is the minimum accepted.
#[cw_serde]
pub struct SwapRequest {
    pub input: Coin,
    pub output: Coin,
    pub payer: Addr,
    pub beneficiary: Addr,
}

impl SwapRequest {
    /// Trade paid for and received by the same account.
    pub fn for_account(input: Coin, output: Coin, account: Addr) -> Self {
        Self {
            input,
            output,
            payer: account.clone(),
            beneficiary: account,
        }
    }
}

#[cw_serde]
pub struct AddLiquidity {
    pub provider: Addr,
    /// Upper bound on the non-native side. The first deposit into an empty
    /// pool uses all of it and sets the price.
    pub max_token: Coin,
    pub native_amount: Uint128,
    pub min_liquidity: Uint128,
}

#[cw_serde]
pub struct RemoveLiquidity {
    pub provider: Addr,
    pub liquidity: Coin,
    pub min_token: Uint128,
    pub min_native: Uint128,
}

/// Amounts moved by a deposit or a withdrawal.
#[cw_serde]
pub struct LiquidityReceipt {
    pub token: Coin,
    pub native: Coin,
    pub liquidity: Coin,
}
