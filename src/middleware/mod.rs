//! Middleware and extractors for the tier guards.
//!
//! # Modules
//!
//! - [`tiers`]: one `from_fn_with_state` guard per trust tier
//! - [`identity`]: reading the caller identity out of request headers
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::tiers::require_member;
//!
//! let routes = Router::new()
//!     .route("/grants", get(list_grants))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_member));
//! ```
//!
//! A guard never changes the request it forwards. Handlers behind a
//! session-gated guard read the caller with the [`identity::SessionUser`]
//! extractor.

pub mod identity;
pub mod tiers;
