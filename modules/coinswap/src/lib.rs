pub mod config;
pub mod engine;
mod error;
pub mod limiter;
pub mod math;
pub mod msg;
pub mod registry;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::CoinswapConfig;
pub use engine::Coinswap;
pub use error::CoinswapError;
pub use limiter::RiskLimiter;
pub use registry::PoolRegistry;
pub use state::Pool;
