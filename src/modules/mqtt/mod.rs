//! Callbacks the MQTT broker makes before letting a client connect,
//! publish or subscribe.

pub mod controller;
pub mod router;
pub mod service;
