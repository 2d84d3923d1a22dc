//! Bodies exchanged with the game server.
//!
//! [`client`] holds what this client sends, [`server`] what comes back.

pub mod client;
pub mod server;
