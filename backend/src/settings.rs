//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `REGISTRY_*` environment variables, CLI flags, or a
//! config file; unset values fall back to the defaults below.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SessionPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:3001"];

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("session TTL must be at least one hour, got {hours}")]
    SessionTtl { hours: i64 },
}

/// Registry service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct RegistrySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; when absent the registry keeps state in memory.
    pub database_url: Option<String>,
    /// `trust_snapshot` or `revalidate`.
    pub session_policy: Option<SessionPolicy>,
    /// Browser origins allowed to send credentials. Comma-separated in the
    /// environment.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Session cookie lifetime in hours.
    #[ortho_config(default = 2)]
    pub session_ttl_hours: i64,
}

impl RegistrySettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn session_policy(&self) -> SessionPolicy {
        self.session_policy.unwrap_or_default()
    }

    /// Configured origins, trimmed, with blanks dropped. Falls back to the
    /// local front-end origins when none remain.
    pub fn allowed_origins(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .allowed_origins
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if configured.is_empty() {
            DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| (*origin).to_owned())
                .collect()
        } else {
            configured
        }
    }

    pub fn session_ttl_hours(&self) -> Result<i64, SettingsError> {
        if self.session_ttl_hours >= 1 {
            Ok(self.session_ttl_hours)
        } else {
            Err(SettingsError::SessionTtl {
                hours: self.session_ttl_hours,
            })
        }
    }

    /// Database URL with surrounding whitespace removed; blank counts as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Configuration loading from the environment.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "REGISTRY_BIND_ADDR",
        "REGISTRY_DATABASE_URL",
        "REGISTRY_SESSION_POLICY",
        "REGISTRY_ALLOWED_ORIGINS",
        "REGISTRY_SESSION_TTL_HOURS",
    ];

    fn load_from_empty_args() -> RegistrySettings {
        RegistrySettings::load_from_iter([OsString::from("voter-registry")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:5000".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.session_policy(), SessionPolicy::TrustSnapshot);
        assert_eq!(
            settings.allowed_origins(),
            ["http://localhost:3000", "http://localhost:3001"]
        );
        assert_eq!(settings.session_ttl_hours().expect("ttl"), 2);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("REGISTRY_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            (
                "REGISTRY_DATABASE_URL",
                Some("postgres://registry@localhost/registry".to_owned()),
            ),
            ("REGISTRY_SESSION_POLICY", Some("revalidate".to_owned())),
            (
                "REGISTRY_ALLOWED_ORIGINS",
                Some("https://a.example,https://b.example".to_owned()),
            ),
            ("REGISTRY_SESSION_TTL_HOURS", Some("8".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "127.0.0.1:8080".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://registry@localhost/registry")
        );
        assert_eq!(settings.session_policy(), SessionPolicy::Revalidate);
        assert_eq!(
            settings.allowed_origins(),
            ["https://a.example", "https://b.example"]
        );
        assert_eq!(settings.session_ttl_hours().expect("ttl"), 8);
    }

    fn base_settings() -> RegistrySettings {
        RegistrySettings {
            bind_addr: None,
            database_url: None,
            session_policy: None,
            allowed_origins: Vec::new(),
            session_ttl_hours: 2,
        }
    }

    #[rstest]
    #[case(&[], &["http://localhost:3000", "http://localhost:3001"])]
    #[case(&[" https://a.example ", ""], &["https://a.example"])]
    #[case(&["https://a.example, ,https://b.example"], &["https://a.example", "https://b.example"])]
    fn origins_are_trimmed_with_a_local_fallback(
        #[case] configured: &[&str],
        #[case] expected: &[&str],
    ) {
        let settings = RegistrySettings {
            allowed_origins: configured.iter().map(|o| (*o).to_owned()).collect(),
            ..base_settings()
        };
        assert_eq!(settings.allowed_origins(), expected);
    }

    #[rstest]
    #[case("not an address")]
    #[case("localhost")]
    fn malformed_bind_addr_is_reported(#[case] raw: &str) {
        let settings = RegistrySettings {
            bind_addr: Some(raw.to_owned()),
            ..base_settings()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { value, .. }) if value == raw
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn non_positive_ttl_is_rejected(#[case] hours: i64) {
        let settings = RegistrySettings {
            database_url: Some("  ".to_owned()),
            session_ttl_hours: hours,
            ..base_settings()
        };
        assert!(settings.session_ttl_hours().is_err());
        assert!(settings.database_url().is_none());
    }
}
