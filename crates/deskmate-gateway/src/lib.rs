// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Deskmate assistant.
//!
//! Exposes the REST API: employee registration and lookup, the chat
//! endpoint driving the conversation engine, and memory inspection.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState, ServerConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_is_cloneable() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
        };
        let copy = config.clone();
        assert_eq!(copy.host, config.host);
        assert_eq!(copy.port, 3001);
    }
}
