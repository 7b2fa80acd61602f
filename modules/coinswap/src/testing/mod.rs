
use cosmwasm_std::{coin, Addr, Coin, Uint128};
use valence_keeper_utils::testing::{MockBank, MockChain};

use crate::{
    msg::{AddLiquidity, LiquidityReceipt, RemoveLiquidity, SwapRequest},
    Coinswap, CoinswapConfig, CoinswapError, Pool,
};

pub const NATIVE_DENOM: &str = "anative";

struct Suite {
    pub chain: MockChain,
    pub coinswap: Coinswap<MockBank>,
    pub module: Addr,
    pub provider: Addr,
    pub trader: Addr,
}

impl Default for Suite {
    fn default() -> Self {
        Self::with_config(|config| config)
    }
}

impl Suite {
    fn with_config(configure: impl FnOnce(CoinswapConfig) -> CoinswapConfig) -> Self {
        let chain = MockChain::default();
        let module = chain.addr_make("coinswap");
        let provider = chain.addr_make("provider");
        let trader = chain.addr_make("trader");

        let config = configure(CoinswapConfig::new(NATIVE_DENOM, module.clone()));
        let coinswap = Coinswap::new(chain.bank, config);

        Suite {
            chain,
            coinswap,
            module,
            provider,
            trader,
        }
    }

    fn fund(&mut self, address: &Addr, amount: &[Coin]) {
        self.chain.bank.fund(&mut self.chain.storage, address, amount);
    }

    fn balance(&self, address: &Addr, denom: &str) -> Uint128 {
        self.chain.bank.balance(&self.chain.storage, address, denom)
    }

    fn pool(&self, denom: &str) -> Option<Pool> {
        self.coinswap
            .registry()
            .pool(&self.chain.storage, denom)
            .unwrap()
    }

    /// Funds the provider with exactly what it offers and deposits it.
    fn add_liquidity(
        &mut self,
        max_token: Coin,
        native_amount: u128,
    ) -> Result<LiquidityReceipt, CoinswapError> {
        let provider = self.provider.clone();
        self.fund(
            &provider,
            &[max_token.clone(), coin(native_amount, NATIVE_DENOM)],
        );
        let msg = AddLiquidity {
            provider,
            max_token,
            native_amount: Uint128::new(native_amount),
            min_liquidity: Uint128::zero(),
        };
        self.coinswap.add_liquidity(&mut self.chain.storage, &msg)
    }

    fn seed_pool(&mut self, denom: &str, token_reserve: u128, native_reserve: u128) -> Pool {
        self.add_liquidity(coin(token_reserve, denom), native_reserve)
            .unwrap();
        self.pool(denom).unwrap()
    }

    fn remove_liquidity(&mut self, liquidity: Coin) -> Result<LiquidityReceipt, CoinswapError> {
        let msg = RemoveLiquidity {
            provider: self.provider.clone(),
            liquidity,
            min_token: Uint128::zero(),
            min_native: Uint128::zero(),
        };
        self.coinswap.remove_liquidity(&mut self.chain.storage, &msg)
    }

    /// Trader buys exactly `native_out` spending at most `input`.
    fn buy_native(&mut self, input: Coin, native_out: u128) -> Result<Uint128, CoinswapError> {
        let request = SwapRequest::for_account(
            input,
            coin(native_out, NATIVE_DENOM),
            self.trader.clone(),
        );
        self.coinswap
            .trade_exact_output(&mut self.chain.storage, &request)
    }

    fn trade_exact_output(
        &mut self,
        input: Coin,
        output: Coin,
    ) -> Result<Uint128, CoinswapError> {
        let request = SwapRequest::for_account(input, output, self.trader.clone());
        self.coinswap
            .trade_exact_output(&mut self.chain.storage, &request)
    }

    fn trade_exact_input(
        &mut self,
        input: Coin,
        min_output: Coin,
    ) -> Result<Uint128, CoinswapError> {
        let request = SwapRequest::for_account(input, min_output, self.trader.clone());
        self.coinswap
            .trade_exact_input(&mut self.chain.storage, &request)
    }
}
