//! Denomination trace handling for tokens received over ICS-20.
//!
//! Follows ibc-go: a token arriving through `port/channel` is prefixed with
//! that hop and stored under `ibc/{SHA256(trace)}`, unless the packet is
//! bringing the token back through the hop it originally left from, in which
//! case that hop is unwound instead.

use cosmwasm_std::IbcEndpoint;
use sha2::{Digest, Sha256};

const IBC_DENOM_PREFIX: &str = "ibc/";
const CHANNEL_PREFIX: &str = "channel-";

pub fn denom_prefix(port_id: &str, channel_id: &str) -> String {
    format!("{port_id}/{channel_id}/")
}

/// True when the packet denomination was prefixed by the sending side of
/// this channel, i.e. the token is returning to the chain it came from.
pub fn receiver_chain_is_source(source: &IbcEndpoint, denom: &str) -> bool {
    denom.starts_with(&denom_prefix(&source.port_id, &source.channel_id))
}

/// Local denomination credited by the transfer application for a packet sent
/// from `source` and received on `destination`.
pub fn received_denom(source: &IbcEndpoint, destination: &IbcEndpoint, denom: &str) -> String {
    if receiver_chain_is_source(source, denom) {
        let unprefixed = &denom[denom_prefix(&source.port_id, &source.channel_id).len()..];
        return trace_to_denom(unprefixed);
    }

    let prefixed = format!(
        "{}{}",
        denom_prefix(&destination.port_id, &destination.channel_id),
        denom
    );
    trace_to_denom(&prefixed)
}

/// Voucher denomination for `base_denom` arriving over `port_id/channel_id`.
pub fn voucher_denom(port_id: &str, channel_id: &str, base_denom: &str) -> String {
    ibc_denom(&format!("{}{}", denom_prefix(port_id, channel_id), base_denom))
}

/// `ibc/` followed by the upper case hex SHA-256 of the full trace.
pub fn ibc_denom(full_trace: &str) -> String {
    let hash = Sha256::digest(full_trace.as_bytes());
    format!("{IBC_DENOM_PREFIX}{}", hex::encode_upper(hash))
}

/// Splits `port/channel-N/.../base` into its hop path and base denomination.
/// Only `channel-N` identifiers are recognised as hops, everything after the
/// first segment pair that does not look like one belongs to the base denom.
pub fn split_trace(full_denom: &str) -> (String, String) {
    let items: Vec<&str> = full_denom.split('/').collect();
    let length = items.len();
    let mut path: Vec<&str> = vec![];
    let mut base: Vec<&str> = vec![];

    let mut i = 0;
    while i < length {
        if i < length - 1 && length > 2 && is_channel_id(items[i + 1]) {
            path.push(items[i]);
            path.push(items[i + 1]);
            i += 2;
        } else {
            base.extend_from_slice(&items[i..]);
            break;
        }
    }

    (path.join("/"), base.join("/"))
}

fn trace_to_denom(full_denom: &str) -> String {
    let (path, base) = split_trace(full_denom);
    if path.is_empty() {
        base
    } else {
        ibc_denom(&format!("{path}/{base}"))
    }
}

/// `channel-<n>` as assigned by the channel handshake.
pub fn is_channel_id(id: &str) -> bool {
    id.strip_prefix(CHANNEL_PREFIX)
        .is_some_and(|seq| !seq.is_empty() && seq.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TRANSFER_PORT;

    const ATOM_ON_CHANNEL_0: &str =
        "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";

    fn endpoint(channel: &str) -> IbcEndpoint {
        IbcEndpoint {
            port_id: TRANSFER_PORT.to_string(),
            channel_id: channel.to_string(),
        }
    }

    #[test]
    fn foreign_token_becomes_voucher() {
        let denom = received_denom(&endpoint("channel-141"), &endpoint("channel-0"), "uatom");
        assert_eq!(denom, ATOM_ON_CHANNEL_0);
        assert_eq!(voucher_denom(TRANSFER_PORT, "channel-0", "uatom"), denom);
    }

    #[test]
    fn returning_native_token_is_unwound() {
        // the counterparty prefixed our native token with its side of the channel
        let denom = received_denom(
            &endpoint("channel-141"),
            &endpoint("channel-0"),
            "transfer/channel-141/untrn",
        );
        assert_eq!(denom, "untrn");
    }

    #[test]
    fn returning_multihop_token_keeps_remaining_trace() {
        let denom = received_denom(
            &endpoint("channel-141"),
            &endpoint("channel-0"),
            "transfer/channel-141/transfer/channel-0/uatom",
        );
        assert_eq!(denom, ATOM_ON_CHANNEL_0);
    }

    #[test]
    fn base_denoms_with_slashes_are_not_hops() {
        assert_eq!(
            split_trace("transfer/channel-7/gamm/pool/1"),
            ("transfer/channel-7".to_string(), "gamm/pool/1".to_string())
        );
        assert_eq!(
            split_trace("gamm/pool/1"),
            (String::new(), "gamm/pool/1".to_string())
        );
        assert_eq!(split_trace("uatom"), (String::new(), "uatom".to_string()));
        assert_eq!(
            split_trace("transfer/channel-x/uatom"),
            (String::new(), "transfer/channel-x/uatom".to_string())
        );
    }
}
