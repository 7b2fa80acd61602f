use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Uint128};
use cw_storage_plus::{Item, Map};

use crate::CoinswapError;

/// Pools keyed by their non-native denomination.
pub(crate) const POOLS: Map<&str, Pool> = Map::new("pools");
/// Liquidity token denomination -> pool denomination.
pub(crate) const LIQUIDITY_DENOMS: Map<&str, String> = Map::new("liquidity_denoms");
pub(crate) const POOL_SEQUENCE: Item<u64> = Item::new("pool_sequence");

/// Reserve pair between the native asset and `denom`. Reserves are only
/// changed through the registry and the swap engine.
#[cw_serde]
pub struct Pool {
    denom: String,
    lpt_denom: String,
    non_native_reserve: Uint128,
    native_reserve: Uint128,
    liquidity_supply: Uint128,
}

/// Which side of a pool a trade pays into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TradeDirection {
    /// Non-native in, native out.
    SellToken,
    /// Native in, non-native out.
    BuyToken,
}

impl Pool {
    pub(crate) fn new(denom: String, lpt_denom: String) -> Self {
        Self {
            denom,
            lpt_denom,
            non_native_reserve: Uint128::zero(),
            native_reserve: Uint128::zero(),
            liquidity_supply: Uint128::zero(),
        }
    }

    pub fn denom(&self) -> &str {
        &self.denom
    }

    pub fn lpt_denom(&self) -> &str {
        &self.lpt_denom
    }

    pub fn non_native_reserve(&self) -> Uint128 {
        self.non_native_reserve
    }

    pub fn native_reserve(&self) -> Uint128 {
        self.native_reserve
    }

    pub fn liquidity_supply(&self) -> Uint128 {
        self.liquidity_supply
    }

    pub fn is_funded(&self) -> bool {
        !self.non_native_reserve.is_zero() && !self.native_reserve.is_zero()
    }

    pub fn reserves(&self, native_denom: &str) -> Vec<Coin> {
        vec![
            Coin {
                denom: native_denom.to_string(),
                amount: self.native_reserve,
            },
            Coin {
                denom: self.denom.clone(),
                amount: self.non_native_reserve,
            },
        ]
    }

    /// `(input_reserve, output_reserve)` for a trade in `direction`.
    pub(crate) fn trade_reserves(&self, direction: TradeDirection) -> (Uint128, Uint128) {
        match direction {
            TradeDirection::SellToken => (self.non_native_reserve, self.native_reserve),
            TradeDirection::BuyToken => (self.native_reserve, self.non_native_reserve),
        }
    }

    pub(crate) fn apply_trade(
        &mut self,
        direction: TradeDirection,
        input_amount: Uint128,
        output_amount: Uint128,
    ) -> Result<(), CoinswapError> {
        match direction {
            TradeDirection::SellToken => {
                self.non_native_reserve = self.non_native_reserve.checked_add(input_amount)?;
                self.native_reserve = self.native_reserve.checked_sub(output_amount)?;
            }
            TradeDirection::BuyToken => {
                self.native_reserve = self.native_reserve.checked_add(input_amount)?;
                self.non_native_reserve = self.non_native_reserve.checked_sub(output_amount)?;
            }
        }
        Ok(())
    }

    pub(crate) fn deposit(
        &mut self,
        token_amount: Uint128,
        native_amount: Uint128,
        minted: Uint128,
    ) -> Result<(), CoinswapError> {
        self.non_native_reserve = self.non_native_reserve.checked_add(token_amount)?;
        self.native_reserve = self.native_reserve.checked_add(native_amount)?;
        self.liquidity_supply = self.liquidity_supply.checked_add(minted)?;
        Ok(())
    }

    pub(crate) fn withdraw(
        &mut self,
        token_amount: Uint128,
        native_amount: Uint128,
        burned: Uint128,
    ) -> Result<(), CoinswapError> {
        self.non_native_reserve = self.non_native_reserve.checked_sub(token_amount)?;
        self.native_reserve = self.native_reserve.checked_sub(native_amount)?;
        self.liquidity_supply = self.liquidity_supply.checked_sub(burned)?;
        Ok(())
    }
}
