use std::env;
use std::fmt;
use std::time::Duration;

use lettre::message::Mailbox;
use thiserror::Error;

const DEFAULT_PORT: u16 = 587;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum MailConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Outbound mail settings, built fresh for every relay request.
#[derive(Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when true, opportunistic STARTTLS otherwise.
    pub secure: bool,
    pub user: String,
    pub password: String,
    pub from: Mailbox,
    pub to: Mailbox,
    pub connection_timeout: Duration,
    pub socket_timeout: Duration,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("from", &self.from.to_string())
            .field("to", &self.to.to_string())
            .field("connection_timeout", &self.connection_timeout)
            .field("socket_timeout", &self.socket_timeout)
            .finish()
    }
}

impl MailConfig {
    pub fn from_env() -> Result<Self, MailConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(MailConfigError::Missing(key));

        let host = required("MAIL_HOST")?;
        let port = match get("MAIL_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| MailConfigError::Invalid {
                key: "MAIL_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let secure = match get("MAIL_SECURE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| MailConfigError::Invalid {
                key: "MAIL_SECURE",
                reason: format!("expected true or false, got '{}'", raw),
            })?,
            None => false,
        };
        let user = required("MAIL_USER")?;
        let password = required("MAIL_PASSWORD")?;
        let from = parse_mailbox("MAIL_FROM", &required("MAIL_FROM")?)?;
        let to = parse_mailbox("MAIL_TO", &required("MAIL_TO")?)?;
        let connection_timeout = parse_timeout("MAIL_CONNECTION_TIMEOUT_MS", get("MAIL_CONNECTION_TIMEOUT_MS"))?;
        let socket_timeout = parse_timeout("MAIL_SOCKET_TIMEOUT_MS", get("MAIL_SOCKET_TIMEOUT_MS"))?;

        Ok(Self {
            host,
            port,
            secure,
            user,
            password,
            from,
            to,
            connection_timeout,
            socket_timeout,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_mailbox(key: &'static str, raw: &str) -> Result<Mailbox, MailConfigError> {
    raw.parse::<Mailbox>().map_err(|e| MailConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn parse_timeout(key: &'static str, raw: Option<String>) -> Result<Duration, MailConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS));
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(MailConfigError::Invalid {
            key,
            reason: "timeout must be greater than zero".to_string(),
        }),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(MailConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> MailConfig {
    MailConfig {
        host: "smtp.example.com".to_string(),
        port: 587,
        secure: false,
        user: "mailer".to_string(),
        password: "hunter2".to_string(),
        from: "Studio Website <site@example.com>".parse().unwrap(),
        to: "hello@example.com".parse().unwrap(),
        connection_timeout: Duration::from_secs(10),
        socket_timeout: Duration::from_secs(10),
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

    const FULL: &[(&str, &str)] = &[
        ("MAIL_HOST", "smtp.example.com"),
        ("MAIL_PORT", "465"),
        ("MAIL_SECURE", "true"),
        ("MAIL_USER", "mailer"),
        ("MAIL_PASSWORD", "hunter2"),
        ("MAIL_FROM", "Studio <site@example.com>"),
        ("MAIL_TO", "hello@example.com"),
        ("MAIL_CONNECTION_TIMEOUT_MS", "5000"),
        ("MAIL_SOCKET_TIMEOUT_MS", "20000"),
    ];

    fn without(key: &str) -> Vec<(&'static str, &'static str)> {
        FULL.iter().copied().filter(|(k, _)| *k != key).collect()
    }

    fn with(key: &'static str, value: &'static str) -> Vec<(&'static str, &'static str)> {
        let mut pairs = without(key);
        pairs.push((key, value));
        pairs
    }

    #[test]
    fn reads_every_value() {
        let config = MailConfig::from_lookup(lookup_from(FULL)).unwrap();
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 465);
        assert!(config.secure);
        assert_eq!(config.user, "mailer");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.from.email.to_string(), "site@example.com");
        assert_eq!(config.from.name.as_deref(), Some("Studio"));
        assert_eq!(config.to.email.to_string(), "hello@example.com");
        assert_eq!(config.connection_timeout, Duration::from_millis(5000));
        assert_eq!(config.socket_timeout, Duration::from_millis(20000));
    }

    #[test]
    fn optional_values_fall_back_to_defaults() {
        let pairs: Vec<_> = FULL
            .iter()
            .copied()
            .filter(|(k, _)| {
                !matches!(
                    *k,
                    "MAIL_PORT" | "MAIL_SECURE" | "MAIL_CONNECTION_TIMEOUT_MS" | "MAIL_SOCKET_TIMEOUT_MS"
                )
            })
            .collect();
        let config = MailConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.port, 587);
        assert!(!config.secure);
        assert_eq!(config.connection_timeout, Duration::from_millis(10_000));
        assert_eq!(config.socket_timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn missing_required_values_are_named() {
        for key in ["MAIL_HOST", "MAIL_USER", "MAIL_PASSWORD", "MAIL_FROM", "MAIL_TO"] {
            let err = MailConfig::from_lookup(lookup_from(&without(key))).unwrap_err();
            assert_eq!(err, MailConfigError::Missing(key));
        }
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = MailConfig::from_lookup(lookup_from(&with("MAIL_HOST", "   "))).unwrap_err();
        assert_eq!(err, MailConfigError::Missing("MAIL_HOST"));
    }

    #[test]
    fn rejects_malformed_values() {
        let cases = [
            ("MAIL_PORT", "smtp"),
            ("MAIL_SECURE", "maybe"),
            ("MAIL_FROM", "not an address"),
            ("MAIL_SOCKET_TIMEOUT_MS", "0"),
            ("MAIL_CONNECTION_TIMEOUT_MS", "-1"),
        ];
        for (key, value) in cases {
            match MailConfig::from_lookup(lookup_from(&with(key, value))) {
                Err(MailConfigError::Invalid { key: got, .. }) => assert_eq!(got, key),
                other => panic!("expected {} to be invalid, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
