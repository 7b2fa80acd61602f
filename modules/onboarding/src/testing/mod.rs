
use cosmwasm_std::{
    coin, to_json_binary, Addr, Api, Binary, Event, IbcEndpoint, IbcPacket, IbcTimeout,
    Timestamp, Uint128,
};
use valence_coinswap::{msg::AddLiquidity, Coinswap, CoinswapConfig};
use valence_ibc_utils::{denom::received_denom, Acknowledgement, FungibleTokenPacketData};
use valence_keeper_utils::testing::{MockBank, MockChain};

use crate::{
    params::{set_params, Params},
    MiddlewareStack, OnboardingMiddleware,
};

pub const NATIVE_DENOM: &str = "anative";
pub const USDC_ERC20: &str = "0x80b5a32e4f032b2a058b4f29ec95eefeeb87adcd";
pub const COUNTERPARTY_CHANNEL: &str = "channel-141";
pub const LOCAL_CHANNEL: &str = "channel-0";

struct Suite {
    pub chain: MockChain,
    pub stack: MiddlewareStack,
    // same deployment as the one inside the stack, used to seed pools
    pub coinswap: Coinswap<MockBank>,
    pub recipient: Addr,
}

impl Default for Suite {
    fn default() -> Self {
        Self::with_config(|config| config)
    }
}

impl Suite {
    fn with_config(configure: impl Fn(CoinswapConfig) -> CoinswapConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut chain = MockChain::default();
        let module = chain.addr_make("coinswap");
        let recipient = chain.addr_make("recipient");

        let config = || configure(CoinswapConfig::new(NATIVE_DENOM, module.clone()));
        let middleware = OnboardingMiddleware::new(
            chain.accounts,
            chain.erc20,
            Coinswap::new(chain.bank, config()),
        );
        let stack = MiddlewareStack::builder().push(middleware).build();

        chain
            .accounts
            .register_user(&mut chain.storage, &recipient);
        chain.accounts.register_module(&mut chain.storage, &module, "coinswap");

        // buy exactly 4 base units of gas, small enough for the test pools
        set_params(
            &mut chain.storage,
            &Params {
                auto_swap_threshold: Uint128::new(4),
                ..Params::default()
            },
        )
        .unwrap();

        Suite {
            coinswap: Coinswap::new(chain.bank, config()),
            chain,
            stack,
            recipient,
        }
    }

    fn seed_pool(&mut self, denom: &str, token_reserve: u128, native_reserve: u128) {
        let provider = self.chain.addr_make("provider");
        self.chain.bank.fund(
            &mut self.chain.storage,
            &provider,
            &[coin(token_reserve, denom), coin(native_reserve, NATIVE_DENOM)],
        );
        self.coinswap
            .add_liquidity(
                &mut self.chain.storage,
                &AddLiquidity {
                    provider,
                    max_token: coin(token_reserve, denom),
                    native_amount: Uint128::new(native_reserve),
                    min_liquidity: Uint128::zero(),
                },
            )
            .unwrap();
    }

    fn register_pair(&mut self, denom: &str, erc20_address: &str, enabled: bool) {
        self.chain
            .erc20
            .register_pair(&mut self.chain.storage, denom, erc20_address, enabled);
    }

    fn set_params(&mut self, params: Params) {
        set_params(&mut self.chain.storage, &params).unwrap();
    }

    fn balance(&self, address: &Addr, denom: &str) -> Uint128 {
        self.chain.bank.balance(&self.chain.storage, address, denom)
    }

    fn recipient_evm(&self) -> String {
        let canonical = self
            .chain
            .api
            .addr_canonicalize(self.recipient.as_str())
            .unwrap();
        format!("0x{}", hex::encode(canonical.as_slice()))
    }

    fn packet(&self, data: Binary, destination_channel: &str) -> IbcPacket {
        let endpoint = |channel: &str| IbcEndpoint {
            port_id: "transfer".to_string(),
            channel_id: channel.to_string(),
        };
        IbcPacket::new(
            data,
            endpoint(COUNTERPARTY_CHANNEL),
            endpoint(destination_channel),
            1,
            IbcTimeout::with_timestamp(Timestamp::from_seconds(1_700_000_000)),
        )
    }

    fn transfer_packet(&self, denom: &str, amount: &str, destination_channel: &str) -> IbcPacket {
        let data = FungibleTokenPacketData {
            denom: denom.to_string(),
            amount: amount.to_string(),
            sender: "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu".to_string(),
            receiver: self.recipient.to_string(),
            memo: String::new(),
        };
        self.packet(to_json_binary(&data).unwrap(), destination_channel)
    }

    /// Delivers a transfer the way the transfer application would: the
    /// voucher is credited first, then the stack sees a successful ack.
    fn receive_transfer(
        &mut self,
        denom: &str,
        amount: u128,
        destination_channel: &str,
    ) -> (Acknowledgement, Vec<Event>) {
        let packet = self.transfer_packet(denom, &amount.to_string(), destination_channel);
        let voucher = received_denom(&packet.src, &packet.dest, denom);
        self.chain
            .bank
            .fund(&mut self.chain.storage, &self.recipient, &[coin(amount, voucher)]);
        self.recv_packet(&packet, Acknowledgement::success())
    }

    fn recv_packet(
        &mut self,
        packet: &IbcPacket,
        ack: Acknowledgement,
    ) -> (Acknowledgement, Vec<Event>) {
        let mut ctx = self.chain.context();
        let ack = self.stack.on_recv_packet(&mut ctx, packet, ack);
        (ack, ctx.into_events())
    }
}

fn event_attribute(events: &[Event], ty: &str, key: &str) -> Option<String> {
    events
        .iter()
        .find(|event| event.ty == ty)
        .and_then(|event| event.attributes.iter().find(|attr| attr.key == key))
        .map(|attr| attr.value.clone())
}
