//! # emqam Core
//!
//! Core types shared by every emqam crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The JSON response envelope returned by every endpoint
//!
//! # Example
//!
//! ```ignore
//! use emqam_core::{ApiResponse, AppError};
//!
//! // Terminal rejection produced by an authorization tier
//! let denied = ApiResponse::<()>::status(401);
//!
//! // Handler error
//! let error = AppError::bad_request(anyhow::anyhow!("malformed payload"));
//! ```

pub mod errors;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use response::ApiResponse;
