//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) seed_enabled: bool,
}

impl ServerConfig {
    /// Construct a server configuration with an empty, unseeded store.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            seed_enabled: false,
        }
    }

    /// Load the demo catalogue and accounts into the store on startup.
    #[must_use]
    pub fn with_seed_data(mut self, enabled: bool) -> Self {
        self.seed_enabled = enabled;
        self
    }
}
