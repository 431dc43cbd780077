//! # emqam Models
//!
//! Domain models for the emqam access manager and the parser that turns
//! `&`-separated `key=value` request bodies into them.
//!
//! # Modules
//!
//! - [`acl`]: topic directions, ACL grant requests and topic filter matching
//! - [`credentials`]: login credentials
//! - [`ids`]: the 24-hex-digit user identifier
//! - [`payload`]: the form payload tokenizer and [`FormRecord`] trait
//! - [`users`]: user records and role flags
//!
//! # Example
//!
//! ```ignore
//! use emqam_models::{AclRequest, Credentials, TopicDirection, parse_payload};
//!
//! let login: Credentials = parse_payload(b"username=alice&password=s3cret")?;
//! let grant: AclRequest = parse_payload(b"username=alice&access=publish&topic=a/b")?;
//! assert_eq!(grant.access, Some(TopicDirection::Publish));
//! ```

pub mod acl;
pub mod credentials;
pub mod ids;
pub mod payload;
pub mod users;

// Re-export commonly used types at crate root
pub use acl::{AclRequest, TopicDirection, topic_matches};
pub use credentials::Credentials;
pub use ids::{InvalidUserId, UserId};
pub use payload::{FormRecord, ParseError, parse_payload};
pub use users::{RoleFlags, UserRecord};
