use anyhow::{bail, Context};

pub const DEFAULT_AUTH_TOKEN: &str = "mysecrettoken";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Token expected in `Authorization: Bearer <token>` on guarded routes.
    pub auth_token: String,
    /// When set, POST/PUT/DELETE go through the bearer guard.
    pub require_auth: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            require_auth: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: match lookup("PORT") {
                Some(raw) => raw.trim().parse().context("PORT must be a valid number")?,
                None => defaults.port,
            },
            auth_token: lookup("AUTH_TOKEN").unwrap_or(defaults.auth_token),
            require_auth: match lookup("REQUIRE_AUTH") {
                Some(raw) => parse_flag(&raw).context("REQUIRE_AUTH must be true or false")?,
                None => defaults.require_auth,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => bail!("unrecognised flag value {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.auth_token, "mysecrettoken");
        assert!(!config.require_auth);
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("AUTH_TOKEN", "s3cret"),
            ("REQUIRE_AUTH", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.auth_token, "s3cret");
        assert!(config.require_auth);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid number"));
    }

    #[test]
    fn rejects_unknown_flag_value() {
        assert!(Config::from_lookup(lookup_from(&[("REQUIRE_AUTH", "maybe")])).is_err());
    }
}
