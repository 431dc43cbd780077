//! Grant management. Members read their own grants; admins create grants
//! for any user.

pub mod controller;
pub mod router;
pub mod service;
