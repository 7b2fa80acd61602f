use cosmwasm_std::{Order, StdResult, Storage};
use cw_storage_plus::Bound;

use crate::{
    config::LIQUIDITY_DENOM_PREFIX,
    state::{Pool, LIQUIDITY_DENOMS, POOLS, POOL_SEQUENCE},
    CoinswapConfig, CoinswapError,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

/// Store of pool records. Creation is limited to the configured whitelist
/// and every save re-checks the native reserve cap.
pub struct PoolRegistry<'c> {
    config: &'c CoinswapConfig,
}

impl<'c> PoolRegistry<'c> {
    pub fn new(config: &'c CoinswapConfig) -> Self {
        Self { config }
    }

    pub fn pool(&self, storage: &dyn Storage, denom: &str) -> StdResult<Option<Pool>> {
        POOLS.may_load(storage, denom)
    }

    /// A pool that can be traded against: it exists and both reserves are
    /// non-zero.
    pub fn funded_pool(&self, storage: &dyn Storage, denom: &str) -> Result<Pool, CoinswapError> {
        match self.pool(storage, denom)? {
            Some(pool) if pool.is_funded() => Ok(pool),
            _ => Err(CoinswapError::PoolNotFound {
                denom: denom.to_string(),
            }),
        }
    }

    pub fn pool_by_lpt(
        &self,
        storage: &dyn Storage,
        lpt_denom: &str,
    ) -> Result<Pool, CoinswapError> {
        let denom = LIQUIDITY_DENOMS
            .may_load(storage, lpt_denom)?
            .ok_or_else(|| CoinswapError::UnknownLiquidityDenom {
                denom: lpt_denom.to_string(),
            })?;
        Ok(POOLS.load(storage, &denom)?)
    }

    pub fn pools(
        &self,
        storage: &dyn Storage,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<Vec<Pool>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        let start = start_after.as_deref().map(|denom| Bound::exclusive(denom));

        POOLS
            .range(storage, start, None, Order::Ascending)
            .take(limit)
            .map(|item| item.map(|(_, pool)| pool))
            .collect()
    }

    /// Loads the pool for `denom`, or prepares a new empty one if the
    /// denomination is whitelisted. A new pool is only recorded once it is
    /// saved.
    pub(crate) fn load_or_new(
        &self,
        storage: &dyn Storage,
        denom: &str,
    ) -> Result<Pool, CoinswapError> {
        if let Some(pool) = POOLS.may_load(storage, denom)? {
            return Ok(pool);
        }
        if denom == self.config.native_denom {
            return Err(CoinswapError::InvalidLiquidityDenom {
                denom: denom.to_string(),
            });
        }
        if !self.config.is_whitelisted(denom) {
            return Err(CoinswapError::PoolNotWhitelisted {
                denom: denom.to_string(),
            });
        }

        let sequence = POOL_SEQUENCE.may_load(storage)?.unwrap_or_default() + 1;
        Ok(Pool::new(
            denom.to_string(),
            format!("{LIQUIDITY_DENOM_PREFIX}-{sequence}"),
        ))
    }

    pub(crate) fn ensure_within_cap(&self, pool: &Pool) -> Result<(), CoinswapError> {
        if pool.native_reserve() > self.config.max_native_reserve {
            return Err(CoinswapError::MaxNativeReserveExceeded {
                denom: pool.denom().to_string(),
                reserve: pool.native_reserve(),
                cap: self.config.max_native_reserve,
            });
        }
        Ok(())
    }

    pub(crate) fn save(
        &self,
        storage: &mut dyn Storage,
        pool: &Pool,
    ) -> Result<(), CoinswapError> {
        self.ensure_within_cap(pool)?;
        if !POOLS.has(storage, pool.denom()) {
            let sequence = POOL_SEQUENCE.may_load(storage)?.unwrap_or_default() + 1;
            POOL_SEQUENCE.save(storage, &sequence)?;
            LIQUIDITY_DENOMS.save(storage, pool.lpt_denom(), &pool.denom().to_string())?;
            log::info!("created pool {} for {}", pool.lpt_denom(), pool.denom());
        }
        POOLS.save(storage, pool.denom(), pool)?;
        Ok(())
    }
}
