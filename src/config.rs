//! Client configuration resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment, so values are baked in with
//! `option_env!` when the bundle is built. Parsing is kept in plain functions
//! so native unit tests can exercise it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Same-origin API calls when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "";

/// Where the navigation guard sends visitors without a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnauthenticatedRedirect {
    /// Send them to the login screen.
    #[default]
    Login,
    /// Send them to the 401 error view.
    Unauthorized,
}

/// Errors produced while parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API base URL is neither absolute nor root-relative.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The unauthenticated redirect mode is not recognised.
    #[error("invalid unauthenticated redirect mode: {0}")]
    InvalidRedirectMode(String),

    /// A boolean switch could not be parsed.
    #[error("invalid boolean for {key}: {value}")]
    InvalidBool { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every API path, without a trailing slash.
    pub api_base_url: String,
    pub unauthenticated_redirect: UnauthenticatedRedirect,
    /// Require the shared admin password on the admin screen.
    pub admin_password_gate: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            unauthenticated_redirect: UnauthenticatedRedirect::default(),
            admin_password_gate: false,
        }
    }
}

impl ClientConfig {
    /// Build the config from values captured at compile time.
    ///
    /// Recognised variables:
    /// - `LUNCH_ORDER_API_BASE_URL`: API origin, default same-origin
    /// - `LUNCH_ORDER_UNAUTH_REDIRECT`: `login` (default) or `unauthorized`
    /// - `LUNCH_ORDER_ADMIN_GATE`: enable the shared-password admin gate
    ///
    /// An invalid value logs a warning and falls back to that field's
    /// default; the other fields keep their configured values.
    pub fn from_build_env() -> Self {
        let (config, errors) = Self::from_values(
            option_env!("LUNCH_ORDER_API_BASE_URL"),
            option_env!("LUNCH_ORDER_UNAUTH_REDIRECT"),
            option_env!("LUNCH_ORDER_ADMIN_GATE"),
        );
        for e in &errors {
            log::warn!("using default for invalid client config value: {e}");
        }
        config
    }

    /// Build the config from raw optional strings.
    ///
    /// An invalid value only resets its own field to the default. Every
    /// rejected value is returned alongside the config.
    pub fn from_values(
        api_base_url: Option<&str>,
        unauthenticated_redirect: Option<&str>,
        admin_password_gate: Option<&str>,
    ) -> (Self, Vec<ConfigError>) {
        let defaults = Self::default();
        let mut errors = Vec::new();
        let config = Self {
            api_base_url: or_default(parse_base_url(api_base_url), defaults.api_base_url, &mut errors),
            unauthenticated_redirect: or_default(
                parse_redirect_mode(unauthenticated_redirect),
                defaults.unauthenticated_redirect,
                &mut errors,
            ),
            admin_password_gate: or_default(
                parse_bool("LUNCH_ORDER_ADMIN_GATE", admin_password_gate),
                None,
                &mut errors,
            )
            .unwrap_or(defaults.admin_password_gate),
        };
        (config, errors)
    }
}

fn or_default<T>(parsed: Result<T, ConfigError>, fallback: T, errors: &mut Vec<ConfigError>) -> T {
    parsed.unwrap_or_else(|e| {
        errors.push(e);
        fallback
    })
}

fn parse_base_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_API_BASE_URL.to_owned());
    };
    if !(raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with('/')) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_redirect_mode(raw: Option<&str>) -> Result<UnauthenticatedRedirect, ConfigError> {
    let normalized = raw.map(|v| v.trim().to_ascii_lowercase()).unwrap_or_default();
    match normalized.as_str() {
        "" | "login" => Ok(UnauthenticatedRedirect::Login),
        "unauthorized" | "401" => Ok(UnauthenticatedRedirect::Unauthorized),
        _ => Err(ConfigError::InvalidRedirectMode(normalized)),
    }
}

fn parse_bool(key: &'static str, raw: Option<&str>) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool { key, value: raw.to_owned() }),
    }
}
