//! # emqam Config
//!
//! Configuration types for the emqam access manager.
//!
//! Every structure is loaded once at process start from environment variables
//! (after `dotenvy` has read any `.env` file) and then injected read-only
//! into whatever needs it:
//!
//! - [`security`]: application key/secret the broker presents
//! - [`server`]: listen address and external store timeout
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`logging`]: log level and log directory
//! - [`bootstrap`]: optional administrator seeded into the in-memory directory
//!
//! # Example
//!
//! ```ignore
//! use emqam_config::{SecurityConfig, ServerConfig};
//!
//! let security = SecurityConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod bootstrap;
pub mod cors;
pub mod logging;
pub mod security;
pub mod server;

mod env;

// Re-export commonly used types at crate root
pub use bootstrap::BootstrapConfig;
pub use cors::CorsConfig;
pub use logging::LoggingConfig;
pub use security::SecurityConfig;
pub use server::ServerConfig;
