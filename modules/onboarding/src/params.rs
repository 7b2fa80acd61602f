use std::collections::BTreeSet;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage, Uint128};
use cw_storage_plus::Item;
use valence_ibc_utils::denom::is_channel_id;

use crate::OnboardingError;

pub const PARAMS: Item<Params> = Item::new("onboarding_params");

/// Four units of an 18 decimal native asset.
pub const DEFAULT_AUTO_SWAP_THRESHOLD: Uint128 = Uint128::new(4_000_000_000_000_000_000);
pub const DEFAULT_WHITELISTED_CHANNEL: &str = "channel-0";

#[cw_serde]
pub struct Params {
    pub enable_onboarding: bool,
    /// Native balance below which part of an incoming transfer is swapped,
    /// and the amount bought when it is.
    pub auto_swap_threshold: Uint128,
    /// Destination channels onboarding runs on.
    pub whitelisted_channels: Vec<String>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            enable_onboarding: true,
            auto_swap_threshold: DEFAULT_AUTO_SWAP_THRESHOLD,
            whitelisted_channels: vec![DEFAULT_WHITELISTED_CHANNEL.to_string()],
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), OnboardingError> {
        if self.enable_onboarding && self.auto_swap_threshold.is_zero() {
            return Err(OnboardingError::ZeroThreshold {});
        }

        let mut seen = BTreeSet::new();
        for channel in &self.whitelisted_channels {
            if !is_channel_id(channel) {
                return Err(OnboardingError::InvalidChannel {
                    channel: channel.clone(),
                });
            }
            if !seen.insert(channel.as_str()) {
                return Err(OnboardingError::DuplicateChannel {
                    channel: channel.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn is_whitelisted(&self, channel: &str) -> bool {
        self.whitelisted_channels.iter().any(|c| c == channel)
    }
}

/// Stored params, or the defaults when none were ever set.
pub fn params(storage: &dyn Storage) -> StdResult<Params> {
    Ok(PARAMS.may_load(storage)?.unwrap_or_default())
}

pub fn set_params(storage: &mut dyn Storage, params: &Params) -> Result<(), OnboardingError> {
    params.validate()?;
    PARAMS.save(storage, params)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::MockStorage;

    use super::*;

    #[test]
    fn defaults_apply_until_set() {
        let mut storage = MockStorage::new();
        assert_eq!(params(&storage).unwrap(), Params::default());

        let custom = Params {
            enable_onboarding: false,
            auto_swap_threshold: Uint128::new(1),
            whitelisted_channels: vec!["channel-0".to_string(), "channel-3".to_string()],
        };
        set_params(&mut storage, &custom).unwrap();
        assert_eq!(params(&storage).unwrap(), custom);
    }

    #[test]
    fn invalid_params_are_not_stored() {
        let mut storage = MockStorage::new();

        let zero = Params {
            auto_swap_threshold: Uint128::zero(),
            ..Params::default()
        };
        assert_eq!(
            set_params(&mut storage, &zero).unwrap_err(),
            OnboardingError::ZeroThreshold {}
        );

        let duplicate = Params {
            whitelisted_channels: vec!["channel-0".to_string(), "channel-0".to_string()],
            ..Params::default()
        };
        assert_eq!(
            set_params(&mut storage, &duplicate).unwrap_err(),
            OnboardingError::DuplicateChannel {
                channel: "channel-0".to_string()
            }
        );

        let malformed = Params {
            whitelisted_channels: vec!["transfer".to_string()],
            ..Params::default()
        };
        assert!(matches!(
            set_params(&mut storage, &malformed),
            Err(OnboardingError::InvalidChannel { .. })
        ));

        assert!(PARAMS.may_load(&storage).unwrap().is_none());
    }

    #[test]
    fn zero_threshold_is_allowed_while_disabled() {
        let disabled = Params {
            enable_onboarding: false,
            auto_swap_threshold: Uint128::zero(),
            ..Params::default()
        };
        assert!(disabled.validate().is_ok());
    }
}
