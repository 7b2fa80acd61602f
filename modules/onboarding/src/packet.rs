use cosmwasm_std::{Addr, Api, Coin, IbcPacket};
use valence_ibc_utils::{denom::received_denom, FungibleTokenPacketData};

use crate::OnboardingError;

/// What the interceptor needs to know about a received transfer.
#[derive(Clone, Debug, PartialEq)]
pub struct PacketContext {
    pub source_channel: String,
    pub destination_channel: String,
    /// Sender on the counterparty chain, in its own address format.
    pub sender: String,
    pub recipient: Addr,
    /// `0x` hex of the recipient's canonical address, as the ERC-20 side
    /// identifies it.
    pub recipient_evm: String,
    /// Amount in the local denomination credited by the transfer application.
    pub transferred: Coin,
}

impl PacketContext {
    pub fn decode(api: &dyn Api, packet: &IbcPacket) -> Result<Self, OnboardingError> {
        let data = FungibleTokenPacketData::decode(&packet.data)?;
        let amount = data.amount()?;

        let recipient = api.addr_validate(&data.receiver)?;
        let canonical = api.addr_canonicalize(recipient.as_str())?;

        Ok(Self {
            source_channel: packet.src.channel_id.clone(),
            destination_channel: packet.dest.channel_id.clone(),
            sender: data.sender,
            recipient,
            recipient_evm: format!("0x{}", hex::encode(canonical.as_slice())),
            transferred: Coin {
                denom: received_denom(&packet.src, &packet.dest, &data.denom),
                amount,
            },
        })
    }
}
