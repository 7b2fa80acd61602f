mod error;
pub mod middleware;
pub mod packet;
pub mod params;
pub mod stack;

#[cfg(test)]
mod testing;

pub use error::OnboardingError;
pub use middleware::OnboardingMiddleware;
pub use stack::{IbcMiddleware, MiddlewareStack};
