use std::collections::BTreeMap;

use cosmwasm_std::{Coin, Uint128};

use crate::CoinswapError;

/// Per-denomination ceiling on the input side of a single trade.
///
/// Denominations without an entry cannot be swapped at all, and an empty
/// table (`RiskLimiter::default()`) disables swapping entirely. Limits are
/// inclusive and expressed in each asset's own base units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskLimiter {
    limits: BTreeMap<String, Uint128>,
}

impl RiskLimiter {
    pub fn new(limits: impl IntoIterator<Item = (String, Uint128)>) -> Self {
        Self {
            limits: limits.into_iter().collect(),
        }
    }

    pub fn with_limit(mut self, denom: impl Into<String>, max_input: Uint128) -> Self {
        self.limits.insert(denom.into(), max_input);
        self
    }

    pub fn max_input(&self, denom: &str) -> Option<Uint128> {
        self.limits.get(denom).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn check(&self, input: &Coin) -> Result<(), CoinswapError> {
        let Some(limit) = self.max_input(&input.denom) else {
            return Err(CoinswapError::RiskLimitExceeded {
                denom: input.denom.clone(),
                amount: input.amount,
                limit: Uint128::zero(),
            });
        };
        if input.amount > limit {
            return Err(CoinswapError::RiskLimitExceeded {
                denom: input.denom.clone(),
                amount: input.amount,
                limit,
            });
        }
        Ok(())
    }
}
