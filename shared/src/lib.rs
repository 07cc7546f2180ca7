//! Shared types for the Concierge platform
//!
//! Types used across the workspace: tenant discriminators, the error
//! system, and the session payload.

pub mod error;
pub mod session;
pub mod tenant;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use tenant::{BusinessType, UserRole};
