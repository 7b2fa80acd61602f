use std::collections::BTreeSet;

use cosmwasm_std::{Addr, Uint128};
use valence_ibc_utils::{denom::voucher_denom, TRANSFER_PORT};

use crate::RiskLimiter;

/// 10,000 units of an 18 decimal native asset.
pub const MAX_NATIVE_RESERVE_PER_POOL: Uint128 =
    Uint128::new(10_000 * 1_000_000_000_000_000_000);

pub const LIQUIDITY_DENOM_PREFIX: &str = "lpt";

/// Channel the whitelisted vouchers arrive on.
pub const WHITELIST_CHANNEL: &str = "channel-0";
pub const USDC_BASE_DENOM: &str = "uusdc";
pub const USDT_BASE_DENOM: &str = "uusdt";
pub const ETH_BASE_DENOM: &str = "eth-wei";

/// Deployment constants of the swap engine. None of these are governance
/// parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CoinswapConfig {
    pub native_denom: String,
    /// Account holding the reserves of every pool.
    pub module_account: Addr,
    pub pool_whitelist: BTreeSet<String>,
    pub max_native_reserve: Uint128,
    pub limiter: RiskLimiter,
}

impl CoinswapConfig {
    pub fn new(native_denom: impl Into<String>, module_account: Addr) -> Self {
        Self {
            native_denom: native_denom.into(),
            module_account,
            pool_whitelist: default_pool_whitelist(),
            max_native_reserve: MAX_NATIVE_RESERVE_PER_POOL,
            limiter: default_limiter(),
        }
    }

    pub fn with_pool_whitelist(mut self, denoms: impl IntoIterator<Item = String>) -> Self {
        self.pool_whitelist = denoms.into_iter().collect();
        self
    }

    pub fn with_limiter(mut self, limiter: RiskLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn with_max_native_reserve(mut self, cap: Uint128) -> Self {
        self.max_native_reserve = cap;
        self
    }

    pub fn is_whitelisted(&self, denom: &str) -> bool {
        self.pool_whitelist.contains(denom)
    }
}

pub fn usdc_denom() -> String {
    voucher_denom(TRANSFER_PORT, WHITELIST_CHANNEL, USDC_BASE_DENOM)
}

pub fn usdt_denom() -> String {
    voucher_denom(TRANSFER_PORT, WHITELIST_CHANNEL, USDT_BASE_DENOM)
}

pub fn eth_denom() -> String {
    voucher_denom(TRANSFER_PORT, WHITELIST_CHANNEL, ETH_BASE_DENOM)
}

pub fn default_pool_whitelist() -> BTreeSet<String> {
    BTreeSet::from([usdc_denom(), usdt_denom(), eth_denom()])
}

/// 10 USDC, 10 USDT (6 decimals) and 0.01 ETH (18 decimals) per trade.
pub fn default_limiter() -> RiskLimiter {
    RiskLimiter::default()
        .with_limit(usdc_denom(), Uint128::new(10_000_000))
        .with_limit(usdt_denom(), Uint128::new(10_000_000))
        .with_limit(eth_denom(), Uint128::new(10_000_000_000_000_000))
}
