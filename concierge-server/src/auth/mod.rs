//! Authentication
//!
//! Bearer tokens (HS256 JWT) and the per-IP request limiter.

pub mod jwt;
pub mod rate_limit;

pub use jwt::{Claims, JwtError, JwtService};
pub use rate_limit::RateLimiter;
