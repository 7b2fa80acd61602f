//! Interfaces of the chain modules the onboarding flow depends on.
//!
//! Keepers are handles: they hold no state of their own and read or write
//! through the storage handed to each call, so a branched storage also
//! branches every keeper write made through it.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, StdResult, Storage, Uint128};

use crate::ConversionError;

#[cw_serde]
pub enum AccountKind {
    User,
    Module { name: String },
}

#[cw_serde]
pub struct Account {
    pub address: Addr,
    pub kind: AccountKind,
}

impl Account {
    pub fn is_module(&self) -> bool {
        matches!(self.kind, AccountKind::Module { .. })
    }
}

pub trait AccountKeeper {
    /// Returns `None` for addresses that have never been used on chain.
    fn account(&self, storage: &dyn Storage, address: &Addr) -> StdResult<Option<Account>>;
}

pub trait BankKeeper {
    /// Balance that is not locked by vesting or other holds.
    fn spendable_balance(
        &self,
        storage: &dyn Storage,
        address: &Addr,
        denom: &str,
    ) -> StdResult<Uint128>;

    fn send_coins(
        &self,
        storage: &mut dyn Storage,
        from: &Addr,
        to: &Addr,
        amount: &[Coin],
    ) -> StdResult<()>;

    fn mint_coins(&self, storage: &mut dyn Storage, to: &Addr, amount: &[Coin]) -> StdResult<()>;

    fn burn_coins(&self, storage: &mut dyn Storage, from: &Addr, amount: &[Coin])
        -> StdResult<()>;
}

/// A native coin and the ERC-20 contract representing it.
#[cw_serde]
pub struct TokenPair {
    pub erc20_address: String,
    pub denom: String,
    pub enabled: bool,
}

/// Registry of token pairs and the gateway converting between both sides.
pub trait Erc20Keeper {
    fn token_pair_id(&self, storage: &dyn Storage, denom: &str) -> StdResult<Option<String>>;

    fn token_pair(&self, storage: &dyn Storage, id: &str) -> StdResult<Option<TokenPair>>;

    /// Converts `coin` held by `sender` into its ERC-20 representation owned
    /// by the hex encoded `receiver`.
    fn convert_coin(
        &self,
        storage: &mut dyn Storage,
        coin: &Coin,
        sender: &Addr,
        receiver: &str,
    ) -> Result<(), ConversionError>;
}
