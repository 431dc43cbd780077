//! # emqam Auth
//!
//! The authorization decision layer of the emqam access manager.
//!
//! This crate provides:
//!
//! - [`identity`]: the identity fields a caller presents (`app_key`,
//!   `app_secret`, `access_token`, `user_id`) and the session token built
//!   from them
//! - [`tier`]: the four trust tiers, their role requirements and the
//!   [`AuthorizationOutcome`] each tier produces
//! - [`pipeline`]: [`AuthorizationPipeline`], which evaluates a tier against
//!   the external session store and user directory
//! - [`stores`]: traits for the external collaborators (session store, user
//!   directory, credential verifier, ACL store)
//! - [`memory`]: an in-memory implementation of every store trait
//! - [`error`]: the [`AuthError`] taxonomy
//!
//! # Tiers
//!
//! | Tier | Requires | Failure |
//! |------|----------|---------|
//! | Application | configured app key and secret | 401 |
//! | Session | valid `user_id` + `access_token`, active session | 400 / 401 |
//! | Member | session, plus member or admin role | 403 |
//! | Admin | session, plus admin role | 403 |
//!
//! # Example
//!
//! ```ignore
//! use emqam_auth::{AuthorizationPipeline, RequestIdentity, Tier};
//!
//! let pipeline = AuthorizationPipeline::new(security, sessions, directory);
//! let outcome = pipeline.authorize(Tier::Member, &identity).await;
//! if !outcome.is_allowed() {
//!     return reject(outcome.status_code());
//! }
//! ```

pub mod error;
pub mod identity;
pub mod memory;
pub mod pipeline;
pub mod stores;
pub mod tier;

// Re-export commonly used types at crate root
pub use error::{AuthError, Stage};
pub use identity::{RequestIdentity, SessionToken};
pub use memory::MemoryStore;
pub use pipeline::AuthorizationPipeline;
pub use stores::{
    AclStore, CredentialVerifier, RoleEvaluator, SessionIssuer, SessionValidator, StoreError,
    call_blocking,
};
pub use tier::{AuthorizationOutcome, RoleRequirement, Tier};
