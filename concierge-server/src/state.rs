//! Application state shared by every route

use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, RateLimiter};
use crate::config::Config;
use crate::graphql::{self, AppSchema};
use crate::services::{AuthService, Notifier, PaymentService};
use crate::session::SessionManager;
use crate::stripe::StripeClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub jwt: JwtService,
    /// Session cookie sealing
    pub sessions: SessionManager,
    pub schema: AppSchema,
    /// Per-IP limiter, only layered in production
    pub rate_limiter: RateLimiter,
    /// Login for the cookie session route
    pub auth: AuthService,
    /// Stripe webhook target
    pub payments: PaymentService,
    pub stripe: StripeClient,
}

impl AppState {
    /// State with push providers and Stripe taken from the configuration
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let notifier = Notifier::from_config(db.clone(), &config);
        let stripe = StripeClient::new(
            config.stripe_secret_key.clone(),
            config.stripe_webhook_secret.clone(),
        );
        Self::with_parts(config, db, notifier, stripe)
    }

    pub fn with_parts(
        config: Config,
        db: Surreal<Db>,
        notifier: Notifier,
        stripe: StripeClient,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt_secret);
        let sessions = SessionManager::new(&config.session_password, config.is_production());
        let rate_limiter = RateLimiter::new(
            config.rate_limit_max,
            Duration::from_secs(config.rate_limit_window_secs),
        );
        let schema = graphql::build_schema(db.clone(), jwt.clone(), notifier, stripe.clone());

        Self {
            auth: AuthService::new(db.clone(), jwt.clone()),
            payments: PaymentService::new(db.clone(), stripe.clone()),
            config: Arc::new(config),
            db,
            jwt,
            sessions,
            schema,
            rate_limiter,
            stripe,
        }
    }
}
