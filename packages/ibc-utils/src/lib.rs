pub mod denom;
mod error;
pub mod types;

pub use error::IbcUtilsError;
pub use types::{Acknowledgement, FungibleTokenPacketData};

/// Port bound by the ICS-20 transfer application.
pub const TRANSFER_PORT: &str = "transfer";
