pub mod acl;
pub mod auth;
pub mod mqtt;
pub mod session;

pub use self::auth::model::LoginResponse;
pub use self::session::model::SessionInfo;
