pub mod branch;
pub mod context;
mod error;
pub mod keepers;

#[cfg(feature = "testing")]
pub mod testing;

pub use branch::{branch, BranchStorage, PendingWrites};
pub use context::Context;
pub use error::ConversionError;
pub use keepers::{Account, AccountKeeper, AccountKind, BankKeeper, Erc20Keeper, TokenPair};
