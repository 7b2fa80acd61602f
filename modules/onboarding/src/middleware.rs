use std::fmt::Display;

use cosmwasm_std::{Addr, Coin, Event, IbcPacket, StdResult, Storage, Uint128};
use valence_coinswap::{msg::SwapRequest, Coinswap};
use valence_ibc_utils::Acknowledgement;
use valence_keeper_utils::{
    branch, AccountKeeper, BankKeeper, Context, Erc20Keeper, TokenPair,
};

use crate::{
    packet::PacketContext,
    params::{params, Params},
    stack::IbcMiddleware,
};

pub const ONBOARDING_EVENT: &str = "onboarding";
pub const SWAP_EVENT: &str = "swap";

/// Receive-side middleware that tops up the recipient's gas balance from an
/// incoming transfer and converts the rest into its ERC-20 representation.
///
/// It never fails a transfer that the layers beneath accepted, except when
/// the packet payload itself cannot be decoded. Swap and conversion errors
/// are logged and dropped together with any state they wrote.
pub struct OnboardingMiddleware<A, E, B> {
    accounts: A,
    erc20: E,
    coinswap: Coinswap<B>,
}

impl<A, E, B> OnboardingMiddleware<A, E, B>
where
    A: AccountKeeper,
    E: Erc20Keeper,
    B: BankKeeper,
{
    pub fn new(accounts: A, erc20: E, coinswap: Coinswap<B>) -> Self {
        Self {
            accounts,
            erc20,
            coinswap,
        }
    }

    pub fn intercept(
        &self,
        ctx: &mut Context<'_>,
        packet: &IbcPacket,
        ack: Acknowledgement,
    ) -> Acknowledgement {
        if !ack.is_success() {
            log::debug!("transfer on {} already failed", packet.dest.channel_id);
            return ack;
        }

        let params = match params(ctx.storage) {
            Ok(params) => params,
            Err(err) => {
                log::error!("failed to load onboarding params: {err}");
                return ack;
            }
        };
        if !params.enable_onboarding {
            return ack;
        }
        if !params.is_whitelisted(&packet.dest.channel_id) {
            log::debug!("channel {} is not whitelisted", packet.dest.channel_id);
            return ack;
        }

        let transfer = match PacketContext::decode(ctx.api, packet) {
            Ok(transfer) => transfer,
            Err(err) => {
                log::warn!("rejecting transfer on {}: {err}", packet.dest.channel_id);
                return Acknowledgement::error(err.to_string());
            }
        };

        match self.accounts.account(ctx.storage, &transfer.recipient) {
            Ok(Some(account)) if account.is_module() => {
                log::debug!("{} is a module account", transfer.recipient);
                return ack;
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("failed to load account {}: {err}", transfer.recipient);
                return ack;
            }
        }

        let swapped = self.swap_for_gas(ctx, &params, &transfer);

        match self.enabled_pair(ctx.storage, &transfer.transferred.denom) {
            Ok(Some(_)) => {}
            Ok(None) => {
                log::debug!(
                    "no enabled token pair for {}",
                    transfer.transferred.denom
                );
                return ack;
            }
            Err(err) => {
                log::error!(
                    "failed to load token pair for {}: {err}",
                    transfer.transferred.denom
                );
                return ack;
            }
        }

        let converted = self.convert_remainder(ctx, &transfer, swapped);

        ctx.emit(
            Event::new(ONBOARDING_EVENT)
                .add_attribute("sender", &transfer.sender)
                .add_attribute("recipient", transfer.recipient.as_str())
                .add_attribute("packet_src_channel", &transfer.source_channel)
                .add_attribute("packet_dst_channel", &transfer.destination_channel)
                .add_attribute("swap_amount", swapped.to_string())
                .add_attribute("convert_amount", converted.to_string()),
        );
        log::info!(
            "onboarded {}: swapped {} and converted {} of {}",
            transfer.recipient,
            swapped,
            converted,
            transfer.transferred
        );
        ack
    }

    /// Buys exactly the threshold in native gas when the recipient holds
    /// less than that. Returns the amount of the transferred coin spent.
    fn swap_for_gas(
        &self,
        ctx: &mut Context<'_>,
        params: &Params,
        transfer: &PacketContext,
    ) -> Uint128 {
        let native_denom = self.coinswap.native_denom();
        let balance = match self.coinswap.bank().spendable_balance(
            ctx.storage,
            &transfer.recipient,
            native_denom,
        ) {
            Ok(balance) => balance,
            Err(err) => {
                log::error!("failed to load balance of {}: {err}", transfer.recipient);
                return Uint128::zero();
            }
        };
        if balance >= params.auto_swap_threshold {
            return Uint128::zero();
        }

        let request = SwapRequest::for_account(
            transfer.transferred.clone(),
            Coin {
                denom: native_denom.to_string(),
                amount: params.auto_swap_threshold,
            },
            transfer.recipient.clone(),
        );
        let consumed = absorb(ctx.storage, "swap", &transfer.recipient, |storage| {
            self.coinswap.trade_exact_output(storage, &request)
        });
        let Some(consumed) = consumed else {
            return Uint128::zero();
        };

        ctx.emit(
            Event::new(SWAP_EVENT)
                .add_attribute(
                    "input",
                    Coin {
                        denom: transfer.transferred.denom.clone(),
                        amount: consumed,
                    }
                    .to_string(),
                )
                .add_attribute("output", request.output.to_string())
                .add_attribute("recipient", transfer.recipient.as_str()),
        );
        consumed
    }

    /// Converts whatever the swap left of the transfer. Returns the amount
    /// converted.
    fn convert_remainder(
        &self,
        ctx: &mut Context<'_>,
        transfer: &PacketContext,
        swapped: Uint128,
    ) -> Uint128 {
        let remainder = Coin {
            denom: transfer.transferred.denom.clone(),
            amount: transfer.transferred.amount.saturating_sub(swapped),
        };
        if remainder.amount.is_zero() {
            return Uint128::zero();
        }

        absorb(ctx.storage, "conversion", &transfer.recipient, |storage| {
            self.erc20.convert_coin(
                storage,
                &remainder,
                &transfer.recipient,
                &transfer.recipient_evm,
            )
        })
        .map_or(Uint128::zero(), |_| remainder.amount)
    }

    fn enabled_pair(&self, storage: &dyn Storage, denom: &str) -> StdResult<Option<TokenPair>> {
        let Some(id) = self.erc20.token_pair_id(storage, denom)? else {
            return Ok(None);
        };
        Ok(self
            .erc20
            .token_pair(storage, &id)?
            .filter(|pair| pair.enabled))
    }
}

impl<A, E, B> IbcMiddleware for OnboardingMiddleware<A, E, B>
where
    A: AccountKeeper,
    E: Erc20Keeper,
    B: BankKeeper,
{
    fn name(&self) -> &str {
        "onboarding"
    }

    fn on_recv_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &IbcPacket,
        ack: Acknowledgement,
    ) -> Acknowledgement {
        self.intercept(ctx, packet, ack)
    }
}

/// Runs `op` on a branch of `storage`. Its writes are kept only when it
/// succeeds; a failure is logged and reported as `None`.
fn absorb<T, E: Display>(
    storage: &mut dyn Storage,
    step: &str,
    recipient: &Addr,
    op: impl FnOnce(&mut dyn Storage) -> Result<T, E>,
) -> Option<T> {
    match branch(storage, op) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("onboarding {step} for {recipient} failed: {err}");
            None
        }
    }
}
