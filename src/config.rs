//! Support for library configuration options

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Deserialize;
use url::Url;

/// Product name sent in the `User-Agent` header of every HTTP request.
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(format!("taskboard/{}", env!("CARGO_PKG_VERSION")))));

/// How often a mounted notification synchronizer polls its source
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The shortest polling period a synchronizer accepts
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Where the REST backend is expected when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/";

/// Environment variables read by [`Settings::from_env`]
pub const ENV_API_URL: &str = "TASKBOARD_API_URL";
pub const ENV_TOKEN: &str = "TASKBOARD_TOKEN";
pub const ENV_POLL_SECS: &str = "TASKBOARD_POLL_SECS";

/// Runtime settings
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the REST API (the `/api/...` paths are joined to it)
    pub api_url: Url,
    /// Bearer token of the authenticated user, if any
    pub token: Option<String>,
    /// Notification polling period
    #[serde(with = "secs")]
    pub poll_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Settings {
    /// Read settings from the environment, falling back to defaults for missing variables
    pub fn from_env() -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn Error + Send + Sync>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            settings.api_url = Url::parse(&url)
                .map_err(|err| format!("Invalid {} {:?}: {}", ENV_API_URL, url, err))?;
        }
        settings.token = lookup(ENV_TOKEN).filter(|t| t.is_empty() == false);
        if let Some(secs) = lookup(ENV_POLL_SECS) {
            let secs: u64 = secs.trim().parse()
                .map_err(|err| format!("Invalid {} {:?}: {}", ENV_POLL_SECS, secs, err))?;
            if secs == 0 {
                return Err(format!("{} must be at least 1", ENV_POLL_SECS).into());
            }
            settings.poll_interval = Duration::from_secs(secs);
        }

        log::debug!("Settings: API at {}, polling every {:?}", settings.api_url, settings.poll_interval);
        Ok(settings)
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).unwrap(/* this cannot panic since this is a constant, valid URL */)
}

/// The user agent to use in HTTP requests
pub(crate) fn user_agent() -> String {
    match PRODUCT_NAME.lock() {
        Ok(name) => name.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

mod secs {
    use std::time::Duration;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        if secs == 0 {
            return Err(D::Error::custom("poll_interval must be at least 1 second"));
        }
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.poll_interval, Duration::from_secs(30));
        assert!(settings.token.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let settings = Settings::from_lookup(lookup_in(&[
            (ENV_API_URL, "https://tasks.example.com/"),
            (ENV_TOKEN, "abc"),
            (ENV_POLL_SECS, "5"),
        ])).unwrap();
        assert_eq!(settings.api_url.as_str(), "https://tasks.example.com/");
        assert_eq!(settings.token.as_deref(), Some("abc"));
        assert_eq!(settings.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Settings::from_lookup(lookup_in(&[(ENV_API_URL, "not a url")])).is_err());
        assert!(Settings::from_lookup(lookup_in(&[(ENV_POLL_SECS, "soon")])).is_err());
        assert!(Settings::from_lookup(lookup_in(&[(ENV_POLL_SECS, "0")])).is_err());
    }

    #[test]
    fn deserializes_from_json() {
        let settings: Settings = serde_json::from_str(r#"{"api_url": "https://a.b/", "poll_interval": 12}"#).unwrap();
        assert_eq!(settings.api_url.as_str(), "https://a.b/");
        assert_eq!(settings.poll_interval, Duration::from_secs(12));
        assert!(settings.token.is_none());
    }

    #[test]
    fn rejects_a_zero_interval_from_json() {
        let result = serde_json::from_str::<Settings>(r#"{"poll_interval": 0}"#);
        assert!(result.is_err());
        let settings: Settings = serde_json::from_str(r#"{"poll_interval": 1}"#).unwrap();
        assert_eq!(settings.poll_interval, MIN_POLL_INTERVAL);
    }
}
