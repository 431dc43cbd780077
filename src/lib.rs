//! # emqam
//!
//! HTTP access manager for an MQTT broker. It answers the broker's
//! authentication and ACL callbacks, issues sessions to users, and lets
//! administrators grant topic permissions.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Tier guards and identity extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login
//! │   ├── mqtt/        # Broker callbacks (auth, acl)
//! │   ├── session/     # Session introspection
//! │   └── acl/         # Grant management
//! ├── logging.rs        # Subscriber setup and request logging
//! ├── metrics.rs        # Prometheus recorder and counters
//! ├── router.rs         # Route table
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Form payload extractors
//! ```
//!
//! Each feature module has a `controller.rs` with the handlers, a
//! `router.rs`, and where there is logic beyond a single store call, a
//! `service.rs` and `model.rs`.
//!
//! ## Tiers
//!
//! Every route sits behind exactly one tier guard from
//! [`middleware::tiers`]:
//!
//! | Route | Tier |
//! |-------|------|
//! | `POST /api/v1/auth/login` | Application |
//! | `POST /api/v1/mqtt/auth` | Application |
//! | `POST /api/v1/mqtt/acl` | Application |
//! | `GET /api/v1/session` | Session |
//! | `GET /api/v1/acl` | Member |
//! | `POST /api/v1/acl` | Admin |
//!
//! The caller identity travels in the `app_key`, `app_secret`, `user_id` and
//! `access_token` headers. Request bodies are `&`-separated `key=value`
//! pairs.
//!
//! ## Environment Variables
//!
//! ```bash
//! SECURITY_KEY=broker-app-key
//! SECURITY_SECRET=broker-app-secret
//! SERVER_HOST=0.0.0.0
//! SERVER_PORT=8080
//! STORE_TIMEOUT_MS=2000
//! ALLOWED_ORIGINS=http://localhost:3000
//! LOG_LEVEL=info
//! LOG_DIR=storage/logs
//! BOOTSTRAP_ADMIN_USERNAME=admin
//! BOOTSTRAP_ADMIN_PASSWORD=change-me
//! ```

pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use emqam_auth;
pub use emqam_config;
pub use emqam_core;
pub use emqam_models;
