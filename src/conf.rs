//! Environment and configuration utilities.
//!
//! Every setting is resolved through the same chain: an explicit override
//! wins, then the process environment, then a built-in default. Overrides
//! are typically supplied on the command line.

use std::collections::HashMap;
use std::env;
use std::num::{ParseFloatError, ParseIntError};
use std::time::Duration;
use thiserror::Error;

/// Names the host Mission Control is running on.
pub const HOST_SETTING: &str = "LAUNCHPAD_MISSIONCONTROL_SERVICE_HOST";

/// Names the port Mission Control is listening on.
pub const PORT_SETTING: &str = "LAUNCHPAD_MISSIONCONTROL_SERVICE_PORT";

/// Names the request timeout, in seconds, for calls to Mission Control.
pub const TIMEOUT_SETTING: &str = "LAUNCHPAD_MISSIONCONTROL_REQUEST_TIMEOUT";

/// Host used when no host has been configured.
pub const DEFAULT_HOST: &str = "launchpad-missioncontrol";

/// Port used when no port has been configured.
pub const DEFAULT_PORT: &str = "8080";

/// Indicates a setting could not be turned into a usable value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured host is empty.
    #[error("Mission Control host must not be empty")]
    EmptyHost,

    /// The configured port is not a number between 0 and 65535.
    #[error("Invalid Mission Control port '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The configured timeout is not a number.
    #[error("Invalid request timeout '{value}': {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// The configured timeout parsed, but is not a usable duration.
    #[error("Request timeout must be a positive number of seconds, got '{0}'")]
    TimeoutOutOfRange(String),
}

/// An ordered lookup chain for named settings.
///
/// # Examples
///
/// ```
/// use mission_control::conf::Settings;
/// # use temp_env::with_var_unset;
/// # with_var_unset("MY_SETTING", || {
/// let settings = Settings::new().with_override("MY_SETTING", "overridden");
/// assert_eq!(settings.get_or("MY_SETTING", "default"), "overridden");
/// assert_eq!(Settings::new().get_or("MY_SETTING", "default"), "default");
/// # });
/// ```
#[derive(Clone, Debug, Default)]
pub struct Settings {
    overrides: HashMap<String, String>,
}

impl Settings {
    /// Creates a lookup chain with no overrides, which consults only the
    /// environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit value for `name` that takes precedence over the
    /// environment.
    pub fn with_override(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    /// The value of `name`, if it has been overridden or is set in the
    /// environment.
    ///
    /// Environment values that are not valid Unicode are ignored.
    pub fn get(&self, name: &str) -> Option<String> {
        resolve(
            self.overrides.get(name).map(String::as_str),
            env::var(name).ok(),
        )
    }

    /// The value of `name`, or `default` if it is not set anywhere.
    pub fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }
}

fn resolve(explicit: Option<&str>, environment: Option<String>) -> Option<String> {
    explicit.map(str::to_string).or(environment)
}

/// The scheme, host, and port Mission Control can be reached at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceAddress {
    host: String,
    port: u16,
}

impl ServiceAddress {
    /// Scheme used for every call to Mission Control.
    pub const SCHEME: &'static str = "http";

    /// Creates a new address.
    ///
    /// Returns an error if `host` is empty.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ConfigError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        Ok(Self { host, port })
    }

    /// Resolves the address from the host and port settings.
    ///
    /// Returns an error if the host is empty or the port is not a number
    /// in the range 0–65535.
    ///
    /// # Examples
    ///
    /// ```
    /// use mission_control::conf::{PORT_SETTING, ServiceAddress, Settings};
    /// let settings = Settings::new().with_override(PORT_SETTING, "eighty");
    /// assert!(ServiceAddress::from_settings(&settings).is_err());
    /// ```
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let host = settings.get_or(HOST_SETTING, DEFAULT_HOST);
        let port = settings.get_or(PORT_SETTING, DEFAULT_PORT);
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort {
                value: port.clone(),
                source,
            })?;
        Self::new(host, port)
    }

    /// Host Mission Control is running on.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port Mission Control is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// The request timeout configured by the timeout setting, if any.
///
/// An unset timeout means requests use the HTTP client's default behavior.
pub fn request_timeout(settings: &Settings) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = settings.get(TIMEOUT_SETTING) else {
        return Ok(None);
    };
    let seconds = value
        .trim()
        .parse::<f64>()
        .map_err(|source| ConfigError::InvalidTimeout {
            value: value.clone(),
            source,
        })?;
    match Duration::try_from_secs_f64(seconds) {
        Ok(timeout) if !timeout.is_zero() => Ok(Some(timeout)),
        _ => Err(ConfigError::TimeoutOutOfRange(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use temp_env::{with_var, with_var_unset, with_vars, with_vars_unset};

    #[test]
    fn it_prefers_an_explicit_value_to_the_environment() {
        let resolved = resolve(Some("explicit"), Some(String::from("environment")));
        assert_eq!(resolved.as_deref(), Some("explicit"));
    }

    #[test]
    fn it_falls_back_to_the_environment() {
        let resolved = resolve(None, Some(String::from("environment")));
        assert_eq!(resolved.as_deref(), Some("environment"));
    }

    #[test]
    fn it_resolves_nothing_when_nothing_is_set() {
        assert_eq!(resolve(None, None), None);
    }

    #[test]
    fn it_reads_a_setting_from_the_environment() {
        with_var(HOST_SETTING, Some("mc.example.com"), || {
            let host = Settings::new().get_or(HOST_SETTING, DEFAULT_HOST);
            assert_eq!(host, "mc.example.com");
        })
    }

    #[test]
    fn it_reads_an_overridden_setting_before_the_environment() {
        with_var(HOST_SETTING, Some("mc.example.com"), || {
            let host = Settings::new()
                .with_override(HOST_SETTING, "override.example.com")
                .get_or(HOST_SETTING, DEFAULT_HOST);
            assert_eq!(host, "override.example.com");
        })
    }

    #[test]
    fn it_uses_the_default_address_when_unconfigured() {
        with_vars_unset([HOST_SETTING, PORT_SETTING], || {
            let address = ServiceAddress::from_settings(&Settings::new()).unwrap();
            assert_eq!(address.host(), "launchpad-missioncontrol");
            assert_eq!(address.port(), 8080);
        })
    }

    #[test]
    fn it_resolves_the_address_from_the_environment() {
        with_vars(
            [(HOST_SETTING, Some("localhost")), (PORT_SETTING, Some("9090"))],
            || {
                let address = ServiceAddress::from_settings(&Settings::new()).unwrap();
                assert_eq!(address, ServiceAddress::new("localhost", 9090).unwrap());
            },
        )
    }

    #[test]
    fn it_rejects_a_non_numeric_port() {
        with_var(PORT_SETTING, Some("eighty"), || {
            let address = ServiceAddress::from_settings(&Settings::new());
            assert!(matches!(
                address,
                Err(ConfigError::InvalidPort { ref value, .. }) if value == "eighty"
            ));
        })
    }

    #[test]
    fn it_rejects_a_port_that_is_out_of_range() {
        let settings = Settings::new().with_override(PORT_SETTING, "65536");
        let address = ServiceAddress::from_settings(&settings);
        assert!(matches!(address, Err(ConfigError::InvalidPort { .. })));
    }

    #[test]
    fn it_rejects_an_empty_host() {
        let settings = Settings::new().with_override(HOST_SETTING, "  ");
        let address = ServiceAddress::from_settings(&settings);
        assert!(matches!(address, Err(ConfigError::EmptyHost)));
    }

    #[test]
    fn it_has_no_timeout_by_default() {
        with_var_unset(TIMEOUT_SETTING, || {
            let timeout = request_timeout(&Settings::new()).unwrap();
            assert_eq!(timeout, None);
        })
    }

    #[test]
    fn it_reads_a_fractional_timeout() {
        let settings = Settings::new().with_override(TIMEOUT_SETTING, "2.5");
        let timeout = request_timeout(&settings).unwrap();
        assert_eq!(timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn it_rejects_a_timeout_that_is_not_a_number() {
        let settings = Settings::new().with_override(TIMEOUT_SETTING, "soon");
        let timeout = request_timeout(&settings);
        assert!(matches!(timeout, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn it_rejects_a_zero_timeout() {
        let settings = Settings::new().with_override(TIMEOUT_SETTING, "0");
        let timeout = request_timeout(&settings);
        assert!(matches!(timeout, Err(ConfigError::TimeoutOutOfRange(_))));
    }

    #[test]
    fn it_rejects_a_negative_timeout() {
        let settings = Settings::new().with_override(TIMEOUT_SETTING, "-1");
        let timeout = request_timeout(&settings);
        assert!(matches!(timeout, Err(ConfigError::TimeoutOutOfRange(_))));
    }
}
