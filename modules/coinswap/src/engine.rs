use cosmwasm_std::{Addr, Coin, Storage, Uint128};
use valence_keeper_utils::BankKeeper;

use crate::{
    math::{exact_input_output, exact_output_input, mul_div_ceil, mul_div_floor},
    msg::{AddLiquidity, LiquidityReceipt, RemoveLiquidity, SwapRequest},
    registry::PoolRegistry,
    state::TradeDirection,
    CoinswapConfig, CoinswapError,
};

/// Swap engine over the pool registry. Every pool trades against the native
/// asset, so a trade always touches exactly one pool; trades between two
/// non-native denominations are refused outright.
pub struct Coinswap<B> {
    bank: B,
    config: CoinswapConfig,
}

impl<B: BankKeeper> Coinswap<B> {
    pub fn new(bank: B, config: CoinswapConfig) -> Self {
        Self { bank, config }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn config(&self) -> &CoinswapConfig {
        &self.config
    }

    pub fn native_denom(&self) -> &str {
        &self.config.native_denom
    }

    pub fn registry(&self) -> PoolRegistry<'_> {
        PoolRegistry::new(&self.config)
    }

    /// Input required to buy exactly `output` with `input_denom`.
    pub fn quote_exact_output(
        &self,
        storage: &dyn Storage,
        input_denom: &str,
        output: &Coin,
    ) -> Result<Uint128, CoinswapError> {
        let (pool_denom, direction) = self.resolve(input_denom, &output.denom)?;
        let pool = self.registry().funded_pool(storage, &pool_denom)?;
        let (input_reserve, output_reserve) = pool.trade_reserves(direction);
        exact_output_input(input_reserve, output_reserve, output.amount)
    }

    /// Output bought by selling exactly `input` for `output_denom`.
    pub fn quote_exact_input(
        &self,
        storage: &dyn Storage,
        input: &Coin,
        output_denom: &str,
    ) -> Result<Uint128, CoinswapError> {
        let (pool_denom, direction) = self.resolve(&input.denom, output_denom)?;
        let pool = self.registry().funded_pool(storage, &pool_denom)?;
        let (input_reserve, output_reserve) = pool.trade_reserves(direction);
        exact_input_output(input_reserve, output_reserve, input.amount)
    }

    /// Buys exactly `request.output`, spending at most `request.input`.
    /// Returns the input actually consumed.
    pub fn trade_exact_output(
        &self,
        storage: &mut dyn Storage,
        request: &SwapRequest,
    ) -> Result<Uint128, CoinswapError> {
        let (pool_denom, direction) = self.resolve(&request.input.denom, &request.output.denom)?;
        if request.input.amount.is_zero() || request.output.amount.is_zero() {
            return Err(CoinswapError::ZeroAmount {});
        }

        let registry = self.registry();
        let mut pool = registry.funded_pool(storage, &pool_denom)?;
        self.config.limiter.check(&request.input)?;

        let (input_reserve, output_reserve) = pool.trade_reserves(direction);
        let input_amount =
            exact_output_input(input_reserve, output_reserve, request.output.amount)?;
        if input_amount > request.input.amount {
            return Err(CoinswapError::InsufficientLiquidity {
                reason: format!(
                    "{}{} required but only {} offered",
                    input_amount, request.input.denom, request.input.amount
                ),
            });
        }

        pool.apply_trade(direction, input_amount, request.output.amount)?;
        registry.ensure_within_cap(&pool)?;

        let input = coin(input_amount, &request.input.denom);
        self.settle(storage, request, &input, &request.output)?;
        registry.save(storage, &pool)?;

        log::debug!(
            "{} bought {} for {} in pool {}",
            request.payer,
            request.output,
            input,
            pool.lpt_denom()
        );
        Ok(input_amount)
    }

    /// Sells exactly `request.input`, requiring at least `request.output`.
    /// Returns the output received.
    pub fn trade_exact_input(
        &self,
        storage: &mut dyn Storage,
        request: &SwapRequest,
    ) -> Result<Uint128, CoinswapError> {
        let (pool_denom, direction) = self.resolve(&request.input.denom, &request.output.denom)?;
        if request.input.amount.is_zero() {
            return Err(CoinswapError::ZeroAmount {});
        }

        let registry = self.registry();
        let mut pool = registry.funded_pool(storage, &pool_denom)?;
        self.config.limiter.check(&request.input)?;

        let (input_reserve, output_reserve) = pool.trade_reserves(direction);
        let output_amount =
            exact_input_output(input_reserve, output_reserve, request.input.amount)?;
        if output_amount.is_zero() || output_amount < request.output.amount {
            return Err(CoinswapError::ConstraintNotMet {
                reason: format!(
                    "{}{} out, at least {} expected",
                    output_amount, request.output.denom, request.output.amount
                ),
            });
        }

        pool.apply_trade(direction, request.input.amount, output_amount)?;
        registry.ensure_within_cap(&pool)?;

        let output = coin(output_amount, &request.output.denom);
        self.settle(storage, request, &request.input, &output)?;
        registry.save(storage, &pool)?;

        log::debug!(
            "{} sold {} for {} in pool {}",
            request.payer,
            request.input,
            output,
            pool.lpt_denom()
        );
        Ok(output_amount)
    }

    /// Deposits both sides of a pool, creating it on the first deposit for a
    /// whitelisted denomination.
    pub fn add_liquidity(
        &self,
        storage: &mut dyn Storage,
        msg: &AddLiquidity,
    ) -> Result<LiquidityReceipt, CoinswapError> {
        let denom = msg.max_token.denom.as_str();
        if denom == self.native_denom() {
            return Err(CoinswapError::InvalidLiquidityDenom {
                denom: denom.to_string(),
            });
        }
        if msg.max_token.amount.is_zero() || msg.native_amount.is_zero() {
            return Err(CoinswapError::ZeroAmount {});
        }

        let registry = self.registry();
        let mut pool = registry.load_or_new(storage, denom)?;

        let (token_amount, minted) = if pool.liquidity_supply().is_zero() {
            (msg.max_token.amount, msg.native_amount)
        } else {
            let token_amount = mul_div_ceil(
                msg.native_amount,
                pool.non_native_reserve(),
                pool.native_reserve(),
            )?;
            if token_amount > msg.max_token.amount {
                return Err(CoinswapError::ConstraintNotMet {
                    reason: format!(
                        "{}{} required, at most {} allowed",
                        token_amount, denom, msg.max_token.amount
                    ),
                });
            }
            let minted = mul_div_floor(
                msg.native_amount,
                pool.liquidity_supply(),
                pool.native_reserve(),
            )?;
            (token_amount, minted)
        };
        if minted.is_zero() || minted < msg.min_liquidity {
            return Err(CoinswapError::ConstraintNotMet {
                reason: format!(
                    "{} liquidity minted, at least {} expected",
                    minted, msg.min_liquidity
                ),
            });
        }

        pool.deposit(token_amount, msg.native_amount, minted)?;
        registry.ensure_within_cap(&pool)?;

        let token = coin(token_amount, denom);
        let native = coin(msg.native_amount, self.native_denom());
        let liquidity = coin(minted, pool.lpt_denom());

        self.ensure_spendable(storage, &msg.provider, &token)?;
        self.ensure_spendable(storage, &msg.provider, &native)?;
        self.bank.send_coins(
            storage,
            &msg.provider,
            &self.config.module_account,
            &[token.clone(), native.clone()],
        )?;
        self.bank
            .mint_coins(storage, &msg.provider, &[liquidity.clone()])?;
        registry.save(storage, &pool)?;

        Ok(LiquidityReceipt {
            token,
            native,
            liquidity,
        })
    }

    /// Burns liquidity tokens and pays out the pro rata share of both
    /// reserves, rounded down.
    pub fn remove_liquidity(
        &self,
        storage: &mut dyn Storage,
        msg: &RemoveLiquidity,
    ) -> Result<LiquidityReceipt, CoinswapError> {
        if msg.liquidity.amount.is_zero() {
            return Err(CoinswapError::ZeroAmount {});
        }

        let registry = self.registry();
        let mut pool = registry.pool_by_lpt(storage, &msg.liquidity.denom)?;
        let supply = pool.liquidity_supply();
        if msg.liquidity.amount > supply {
            return Err(CoinswapError::InsufficientLiquidity {
                reason: format!(
                    "{} exceeds the outstanding supply of {}",
                    msg.liquidity, supply
                ),
            });
        }

        let token_amount = mul_div_floor(msg.liquidity.amount, pool.non_native_reserve(), supply)?;
        let native_amount = mul_div_floor(msg.liquidity.amount, pool.native_reserve(), supply)?;
        if token_amount < msg.min_token || native_amount < msg.min_native {
            return Err(CoinswapError::ConstraintNotMet {
                reason: format!(
                    "withdrawal of {}{} and {}{} is below the requested minimum",
                    token_amount,
                    pool.denom(),
                    native_amount,
                    self.native_denom()
                ),
            });
        }

        self.ensure_spendable(storage, &msg.provider, &msg.liquidity)?;
        pool.withdraw(token_amount, native_amount, msg.liquidity.amount)?;

        let token = coin(token_amount, pool.denom());
        let native = coin(native_amount, self.native_denom());
        let payout: Vec<Coin> = [token.clone(), native.clone()]
            .into_iter()
            .filter(|coin| !coin.amount.is_zero())
            .collect();

        self.bank
            .burn_coins(storage, &msg.provider, &[msg.liquidity.clone()])?;
        if !payout.is_empty() {
            self.bank
                .send_coins(storage, &self.config.module_account, &msg.provider, &payout)?;
        }
        registry.save(storage, &pool)?;

        Ok(LiquidityReceipt {
            token,
            native,
            liquidity: msg.liquidity.clone(),
        })
    }

    /// Maps a denomination pair onto the pool it trades against.
    fn resolve(
        &self,
        input_denom: &str,
        output_denom: &str,
    ) -> Result<(String, TradeDirection), CoinswapError> {
        let native = self.native_denom();
        if input_denom == output_denom {
            return Err(CoinswapError::InvalidSwapPair {
                denom: input_denom.to_string(),
            });
        }
        if input_denom != native && output_denom != native {
            return Err(CoinswapError::DoubleSwapDisabled {
                input: input_denom.to_string(),
                output: output_denom.to_string(),
            });
        }

        if input_denom == native {
            Ok((output_denom.to_string(), TradeDirection::BuyToken))
        } else {
            Ok((input_denom.to_string(), TradeDirection::SellToken))
        }
    }

    // Both legs are checked up front so that the second transfer cannot fail
    // after the first one went through.
    fn settle(
        &self,
        storage: &mut dyn Storage,
        request: &SwapRequest,
        input: &Coin,
        output: &Coin,
    ) -> Result<(), CoinswapError> {
        let module = &self.config.module_account;
        self.ensure_spendable(storage, &request.payer, input)?;
        self.ensure_spendable(storage, module, output)?;

        self.bank
            .send_coins(storage, &request.payer, module, &[input.clone()])?;
        self.bank
            .send_coins(storage, module, &request.beneficiary, &[output.clone()])?;
        Ok(())
    }

    fn ensure_spendable(
        &self,
        storage: &dyn Storage,
        address: &Addr,
        coin: &Coin,
    ) -> Result<(), CoinswapError> {
        let available = self
            .bank
            .spendable_balance(storage, address, &coin.denom)?;
        if available < coin.amount {
            return Err(CoinswapError::InsufficientFunds {
                address: address.to_string(),
                denom: coin.denom.clone(),
                available,
                required: coin.amount,
            });
        }
        Ok(())
    }
}

fn coin(amount: Uint128, denom: &str) -> Coin {
    Coin {
        denom: denom.to_string(),
        amount,
    }
}
