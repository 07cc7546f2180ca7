//! Concierge Server - multi-tenant hospitality back office
//!
//! One backend for hotels, restaurants and salons. Every tenant-owned
//! record carries a business id plus a business kind.
//!
//! # Module layout
//!
//! ```text
//! concierge-server/src/
//! ├── api/        # HTTP routes (session, service status, webhook, shell)
//! ├── auth/       # JWT bearer tokens, rate limiting
//! ├── dashboard/  # navigation and access policy of the dashboard
//! ├── db/         # embedded SurrealDB, models, repositories
//! ├── graphql/    # schema, resolvers, guards
//! ├── services/   # reservation workflow, availability, billing, push
//! ├── session/    # sealed cookie session
//! └── stripe/     # Stripe Checkout and webhook verification
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod graphql;
pub mod logger;
pub mod services;
pub mod session;
pub mod state;
pub mod stripe;

pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Security event under the `security` target
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr $(, $($arg:tt)*)?) => {
        tracing::warn!(target: "security", event = $event $(, $($arg)*)?)
    };
    (ERROR, $event:expr $(, $($arg:tt)*)?) => {
        tracing::error!(target: "security", event = $event $(, $($arg)*)?)
    };
    (INFO, $event:expr $(, $($arg:tt)*)?) => {
        tracing::info!(target: "security", event = $event $(, $($arg)*)?)
    };
}
