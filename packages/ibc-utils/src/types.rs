use std::str::FromStr;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, to_json_binary, Binary, IbcAcknowledgement, StdResult, Uint128};
use serde::{Deserialize, Serialize};

use crate::IbcUtilsError;

// https://github.com/cosmos/ibc/tree/main/spec/app/ics-020-fungible-token-transfer
// Not a cw_serde type on purpose: counterparties may append fields we do not read.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FungibleTokenPacketData {
    /// Denomination as seen by the sending chain, including its trace prefix.
    pub denom: String,
    /// Decimal string, the wire format does not bound it to 128 bits.
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl FungibleTokenPacketData {
    /// Decodes the JSON payload of a transfer packet and runs the basic
    /// validation every ICS-20 receiver performs.
    pub fn decode(data: &Binary) -> Result<Self, IbcUtilsError> {
        let packet_data: FungibleTokenPacketData = from_json(data)
            .map_err(|err| IbcUtilsError::InvalidPacketData(err.to_string()))?;
        packet_data.validate()?;
        Ok(packet_data)
    }

    pub fn validate(&self) -> Result<(), IbcUtilsError> {
        if self.denom.trim().is_empty() {
            return Err(IbcUtilsError::InvalidPacketData(
                "denomination cannot be blank".to_string(),
            ));
        }
        if self.sender.trim().is_empty() {
            return Err(IbcUtilsError::InvalidPacketData(
                "sender address cannot be blank".to_string(),
            ));
        }
        if self.receiver.trim().is_empty() {
            return Err(IbcUtilsError::InvalidPacketData(
                "receiver address cannot be blank".to_string(),
            ));
        }
        self.amount().map(|_| ())
    }

    /// Parses the transferred amount. Zero and anything that does not fit in
    /// a `Uint128` are rejected.
    pub fn amount(&self) -> Result<Uint128, IbcUtilsError> {
        let amount =
            Uint128::from_str(&self.amount).map_err(|err| IbcUtilsError::InvalidAmount {
                amount: self.amount.clone(),
                reason: err.to_string(),
            })?;
        if amount.is_zero() {
            return Err(IbcUtilsError::InvalidAmount {
                amount: self.amount.clone(),
                reason: "amount must be positive".to_string(),
            });
        }
        Ok(amount)
    }
}

/// ICS-20 acknowledgement, serialized as `{"result":"AQ=="}` or `{"error":"..."}`.
#[cw_serde]
pub enum Acknowledgement {
    Result(Binary),
    Error(String),
}

impl Acknowledgement {
    pub fn success() -> Self {
        Acknowledgement::Result(Binary::from(vec![1u8]))
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Acknowledgement::Error(msg.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Acknowledgement::Result(_))
    }

    pub fn to_ibc_ack(&self) -> StdResult<IbcAcknowledgement> {
        Ok(IbcAcknowledgement::new(to_json_binary(self)?))
    }

    pub fn from_ibc_ack(ack: &IbcAcknowledgement) -> StdResult<Self> {
        from_json(&ack.data)
    }
}
