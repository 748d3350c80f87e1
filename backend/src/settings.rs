//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `STOREFRONT_*` environment variables over an
//! optional config file.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime settings for the storefront server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Populate the store with the demo catalogue and accounts on startup.
    #[ortho_config(default = true)]
    pub seed_enabled: bool,
}

/// Raised when `bind_addr` is not a socket address.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address '{value}': {source}")]
pub struct BindAddrError {
    value: String,
    #[source]
    source: std::net::AddrParseError,
}

impl AppSettings {
    /// Return the configured listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| BindAddrError {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the configured session key path, falling back to the default
    /// secrets mount.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "STOREFRONT_BIND_ADDR",
        "STOREFRONT_SESSION_KEY_FILE",
        "STOREFRONT_SESSION_ALLOW_EPHEMERAL",
        "STOREFRONT_COOKIE_SECURE",
        "STOREFRONT_SEED_ENABLED",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("storefront")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(!settings.session_allow_ephemeral);
        assert!(settings.cookie_secure);
        assert!(settings.seed_enabled);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STOREFRONT_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "STOREFRONT_SESSION_KEY_FILE",
                Some("/tmp/storefront_key".to_owned()),
            ),
            ("STOREFRONT_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("STOREFRONT_COOKIE_SECURE", Some("false".to_owned())),
            ("STOREFRONT_SEED_ENABLED", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9090
        );
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from("/tmp/storefront_key")
        );
        assert!(settings.session_allow_ephemeral);
        assert!(!settings.cookie_secure);
        assert!(!settings.seed_enabled);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([("STOREFRONT_BIND_ADDR", Some("not-an-address".to_owned()))]);

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("address should not parse");
        assert!(err.to_string().contains("not-an-address"));
    }
}
