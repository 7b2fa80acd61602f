//! In-memory keepers backed by the same storage as the code under test.

use cosmwasm_std::{
    testing::{MockApi, MockStorage},
    Addr, Coin, Order, Record, StdError, StdResult, Storage, Uint128,
};
use cw_storage_plus::{Item, Map};

use crate::{
    Account, AccountKeeper, AccountKind, BankKeeper, Context, ConversionError, Erc20Keeper,
    TokenPair,
};

const BALANCES: Map<(&Addr, &str), Uint128> = Map::new("mock_bank_balances");
const LOCKED: Map<(&Addr, &str), Uint128> = Map::new("mock_bank_locked");
const SUPPLY: Map<&str, Uint128> = Map::new("mock_bank_supply");

const ACCOUNTS: Map<&Addr, Account> = Map::new("mock_accounts");

const PAIR_COUNT: Item<u64> = Item::new("mock_erc20_pair_count");
const PAIR_IDS: Map<&str, String> = Map::new("mock_erc20_pair_ids");
const PAIRS: Map<&str, TokenPair> = Map::new("mock_erc20_pairs");
const ERC20_BALANCES: Map<(&str, &str), Uint128> = Map::new("mock_erc20_balances");
const CONVERSIONS: Item<u64> = Item::new("mock_erc20_conversions");
const FAIL_CONVERSIONS: Item<bool> = Item::new("mock_erc20_fail_conversions");

#[derive(Clone, Copy, Debug, Default)]
pub struct MockBank;

impl MockBank {
    pub fn balance(&self, storage: &dyn Storage, address: &Addr, denom: &str) -> Uint128 {
        BALANCES
            .may_load(storage, (address, denom))
            .unwrap()
            .unwrap_or_default()
    }

    pub fn supply(&self, storage: &dyn Storage, denom: &str) -> Uint128 {
        SUPPLY.may_load(storage, denom).unwrap().unwrap_or_default()
    }

    pub fn fund(&self, storage: &mut dyn Storage, address: &Addr, amount: &[Coin]) {
        self.mint_coins(storage, address, amount).unwrap();
    }

    /// Marks part of a balance as not spendable, like a vesting schedule would.
    pub fn lock(&self, storage: &mut dyn Storage, address: &Addr, coin: &Coin) {
        LOCKED
            .save(storage, (address, coin.denom.as_str()), &coin.amount)
            .unwrap();
    }

    fn credit(&self, storage: &mut dyn Storage, address: &Addr, coin: &Coin) -> StdResult<()> {
        BALANCES.update(storage, (address, coin.denom.as_str()), |balance| {
            Ok::<_, StdError>(balance.unwrap_or_default().checked_add(coin.amount)?)
        })?;
        Ok(())
    }

    fn debit(&self, storage: &mut dyn Storage, address: &Addr, coin: &Coin) -> StdResult<()> {
        let spendable = self.spendable_balance(storage, address, &coin.denom)?;
        if spendable < coin.amount {
            return Err(StdError::generic_err(format!(
                "insufficient funds: {}{} is smaller than {}{}",
                spendable, coin.denom, coin.amount, coin.denom
            )));
        }
        let balance = self.balance(storage, address, &coin.denom);
        BALANCES.save(
            storage,
            (address, coin.denom.as_str()),
            &balance.checked_sub(coin.amount)?,
        )?;
        Ok(())
    }

    fn ensure_spendable(
        &self,
        storage: &dyn Storage,
        address: &Addr,
        amount: &[Coin],
    ) -> StdResult<()> {
        for coin in amount {
            let spendable = self.spendable_balance(storage, address, &coin.denom)?;
            if spendable < coin.amount {
                return Err(StdError::generic_err(format!(
                    "insufficient funds: {}{} is smaller than {}{}",
                    spendable, coin.denom, coin.amount, coin.denom
                )));
            }
        }
        Ok(())
    }
}

impl BankKeeper for MockBank {
    fn spendable_balance(
        &self,
        storage: &dyn Storage,
        address: &Addr,
        denom: &str,
    ) -> StdResult<Uint128> {
        let locked = LOCKED
            .may_load(storage, (address, denom))?
            .unwrap_or_default();
        Ok(self.balance(storage, address, denom).saturating_sub(locked))
    }

    fn send_coins(
        &self,
        storage: &mut dyn Storage,
        from: &Addr,
        to: &Addr,
        amount: &[Coin],
    ) -> StdResult<()> {
        self.ensure_spendable(storage, from, amount)?;
        for coin in amount.iter().filter(|coin| !coin.amount.is_zero()) {
            self.debit(storage, from, coin)?;
            self.credit(storage, to, coin)?;
        }
        Ok(())
    }

    fn mint_coins(&self, storage: &mut dyn Storage, to: &Addr, amount: &[Coin]) -> StdResult<()> {
        for coin in amount.iter().filter(|coin| !coin.amount.is_zero()) {
            self.credit(storage, to, coin)?;
            SUPPLY.update(storage, &coin.denom, |supply| {
                Ok::<_, StdError>(supply.unwrap_or_default().checked_add(coin.amount)?)
            })?;
        }
        Ok(())
    }

    fn burn_coins(
        &self,
        storage: &mut dyn Storage,
        from: &Addr,
        amount: &[Coin],
    ) -> StdResult<()> {
        self.ensure_spendable(storage, from, amount)?;
        for coin in amount.iter().filter(|coin| !coin.amount.is_zero()) {
            self.debit(storage, from, coin)?;
            SUPPLY.update(storage, &coin.denom, |supply| {
                Ok::<_, StdError>(supply.unwrap_or_default().checked_sub(coin.amount)?)
            })?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MockAccounts;

impl MockAccounts {
    pub fn register_user(&self, storage: &mut dyn Storage, address: &Addr) {
        let account = Account {
            address: address.clone(),
            kind: AccountKind::User,
        };
        ACCOUNTS.save(storage, address, &account).unwrap();
    }

    pub fn register_module(&self, storage: &mut dyn Storage, address: &Addr, name: &str) {
        let account = Account {
            address: address.clone(),
            kind: AccountKind::Module {
                name: name.to_string(),
            },
        };
        ACCOUNTS.save(storage, address, &account).unwrap();
    }
}

impl AccountKeeper for MockAccounts {
    fn account(&self, storage: &dyn Storage, address: &Addr) -> StdResult<Option<Account>> {
        ACCOUNTS.may_load(storage, address)
    }
}

/// Token pair registry that burns the native coin and credits an in-memory
/// ERC-20 ledger keyed by hex address.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockErc20 {
    bank: MockBank,
}

impl MockErc20 {
    pub fn register_pair(
        &self,
        storage: &mut dyn Storage,
        denom: &str,
        erc20_address: &str,
        enabled: bool,
    ) -> String {
        let count = PAIR_COUNT.may_load(storage).unwrap().unwrap_or_default() + 1;
        let id = format!("pair-{count}");
        PAIR_COUNT.save(storage, &count).unwrap();
        PAIR_IDS.save(storage, denom, &id).unwrap();
        PAIRS
            .save(
                storage,
                &id,
                &TokenPair {
                    erc20_address: erc20_address.to_string(),
                    denom: denom.to_string(),
                    enabled,
                },
            )
            .unwrap();
        id
    }

    pub fn set_enabled(&self, storage: &mut dyn Storage, denom: &str, enabled: bool) {
        let id = PAIR_IDS.load(storage, denom).unwrap();
        PAIRS
            .update(storage, &id, |pair| {
                let mut pair = pair.ok_or_else(|| StdError::not_found("token pair"))?;
                pair.enabled = enabled;
                Ok::<_, StdError>(pair)
            })
            .unwrap();
    }

    /// When set, conversions escrow the coin and then fail, leaving a partial
    /// write behind for the caller to discard.
    pub fn fail_conversions(&self, storage: &mut dyn Storage, fail: bool) {
        FAIL_CONVERSIONS.save(storage, &fail).unwrap();
    }

    pub fn erc20_balance(
        &self,
        storage: &dyn Storage,
        erc20_address: &str,
        holder: &str,
    ) -> Uint128 {
        ERC20_BALANCES
            .may_load(storage, (erc20_address, holder))
            .unwrap()
            .unwrap_or_default()
    }

    pub fn conversions(&self, storage: &dyn Storage) -> u64 {
        CONVERSIONS.may_load(storage).unwrap().unwrap_or_default()
    }
}

impl Erc20Keeper for MockErc20 {
    fn token_pair_id(&self, storage: &dyn Storage, denom: &str) -> StdResult<Option<String>> {
        PAIR_IDS.may_load(storage, denom)
    }

    fn token_pair(&self, storage: &dyn Storage, id: &str) -> StdResult<Option<TokenPair>> {
        PAIRS.may_load(storage, id)
    }

    fn convert_coin(
        &self,
        storage: &mut dyn Storage,
        coin: &Coin,
        sender: &Addr,
        receiver: &str,
    ) -> Result<(), ConversionError> {
        if coin.amount.is_zero() {
            return Err(ConversionError::ZeroAmount {});
        }
        let valid_receiver = receiver
            .strip_prefix("0x")
            .and_then(|raw| hex::decode(raw).ok())
            .is_some_and(|bytes| !bytes.is_empty());
        if !valid_receiver {
            return Err(ConversionError::InvalidReceiver {
                receiver: receiver.to_string(),
            });
        }

        let id = self
            .token_pair_id(storage, &coin.denom)?
            .ok_or_else(|| ConversionError::PairNotFound {
                denom: coin.denom.clone(),
            })?;
        let pair = PAIRS.load(storage, &id)?;
        if !pair.enabled {
            return Err(ConversionError::PairDisabled {
                denom: coin.denom.clone(),
            });
        }

        self.bank.burn_coins(storage, sender, &[coin.clone()])?;

        if FAIL_CONVERSIONS.may_load(storage)?.unwrap_or_default() {
            return Err(ConversionError::Std(StdError::generic_err(
                "erc20 mint reverted",
            )));
        }

        ERC20_BALANCES.update(storage, (pair.erc20_address.as_str(), receiver), |balance| {
            Ok::<_, StdError>(balance.unwrap_or_default().checked_add(coin.amount)?)
        })?;
        let conversions = CONVERSIONS.may_load(storage)?.unwrap_or_default();
        CONVERSIONS.save(storage, &(conversions + 1))?;
        Ok(())
    }
}

/// Storage, address codec and keepers of a single test chain.
#[derive(Default)]
pub struct MockChain {
    pub storage: MockStorage,
    pub api: MockApi,
    pub bank: MockBank,
    pub accounts: MockAccounts,
    pub erc20: MockErc20,
}

impl MockChain {
    pub fn context(&mut self) -> Context<'_> {
        Context::new(&mut self.storage, &self.api)
    }

    pub fn addr_make(&self, name: &str) -> Addr {
        self.api.addr_make(name)
    }

    /// Every key/value pair currently stored, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<Record> {
        self.storage.range(None, None, Order::Ascending).collect()
    }
}
