//! Runtime-loaded secrets.
//!
//! Same schema as `cfg.toml`, read from the process environment, a TOML
//! string or file, or any key lookup. Missing keys keep their placeholder and
//! values are stored verbatim.

use std::{
    env::{self, VarError},
    fmt, fs, io,
    path::Path,
};

use serde::Deserialize;

use crate::config::Config;
use crate::constants::*;

#[derive(Debug)]
pub enum Error {
    InvalidPort { value: String },
    NotUnicode { key: &'static str },
    Io(io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPort { value } => {
                write!(f, "mqtt_port {value:?} is not an integer in 0..=65535")
            }
            Error::NotUnicode { key } => write!(f, "{key} is set but is not valid UTF-8"),
            Error::Io(e) => write!(f, "failed to read configuration file: {e}"),
            Error::Toml(e) => write!(f, "failed to parse configuration: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidPort { .. } | Error::NotUnicode { .. } => None,
            Error::Io(e) => Some(e),
            Error::Toml(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Toml(e)
    }
}

/// Owned counterpart of [`Config`], built once at startup and passed to
/// whatever needs it.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OwnedConfig {
    pub wifi_ssid: String,
    pub wifi_psk: String,
    pub mqtt_hostname: String,
    pub mqtt_port: u16,
    pub mqtt_username: String,
    pub mqtt_password: String,
    pub topic_status: String,
    pub topic_moisture: String,
}

impl OwnedConfig {
    /// Reads every value through `lookup`, keyed by the `SECRETS_*` names.
    ///
    /// Only fails when `SECRETS_MQTT_PORT` is set to something other than an
    /// empty string or a `u16`.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, Error>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply(|key| Ok(lookup(key)))?;
        Ok(config.loaded("lookup"))
    }

    /// Like [`from_lookup`](Self::from_lookup) over the process environment.
    /// A variable that is set but not UTF-8 is an error rather than unset.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        config.apply(env_var)?;
        Ok(config.loaded("environment"))
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(toml_str)?;
        Ok(config.loaded("TOML"))
    }

    /// Parses `toml_str`, then replaces each value whose key `lookup` returns.
    pub fn from_toml_str_with<F>(toml_str: &str, mut lookup: F) -> Result<Self, Error>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(toml_str)?;
        config.apply(|key| Ok(lookup(key)))?;
        Ok(config.loaded("TOML with overrides"))
    }

    /// Parses `toml_str`, then lets any set `SECRETS_*` variable win.
    pub fn from_toml_str_with_env(toml_str: &str) -> Result<Self, Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.apply(env_var)?;
        Ok(config.loaded("TOML with environment overrides"))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path)?;
        log::info!("Reading configuration from {}", path.display());
        Self::from_toml_str(&toml_str)
    }

    pub fn as_config(&self) -> Config<'_> {
        Config {
            wifi_ssid: &self.wifi_ssid,
            wifi_psk: &self.wifi_psk,
            mqtt_hostname: &self.mqtt_hostname,
            mqtt_port: self.mqtt_port,
            mqtt_username: &self.mqtt_username,
            mqtt_password: &self.mqtt_password,
            topic_status: &self.topic_status,
            topic_moisture: &self.topic_moisture,
        }
    }

    fn apply<F>(&mut self, mut lookup: F) -> Result<(), Error>
    where
        F: FnMut(&'static str) -> Result<Option<String>, Error>,
    {
        let fields = [
            (ENV_WIFI_SSID, &mut self.wifi_ssid),
            (ENV_WIFI_PSK, &mut self.wifi_psk),
            (ENV_MQTT_HOSTNAME, &mut self.mqtt_hostname),
            (ENV_MQTT_USERNAME, &mut self.mqtt_username),
            (ENV_MQTT_PASSWORD, &mut self.mqtt_password),
            (ENV_TOPIC_STATUS, &mut self.topic_status),
            (ENV_TOPIC_MOISTURE, &mut self.topic_moisture),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key)? {
                *field = value;
            }
        }

        if let Some(value) = lookup(ENV_MQTT_PORT)? {
            self.mqtt_port = parse_port(value)?;
        }

        Ok(())
    }

    fn loaded(self, source: &str) -> Self {
        log::info!(
            "Loaded configuration from {}: SSID {:?}, broker {}:{}",
            source,
            self.wifi_ssid,
            self.mqtt_hostname,
            self.mqtt_port
        );
        if self.as_config().is_placeholder() {
            log::warn!("Configuration from {} is still the placeholder", source);
        }
        self
    }
}

// Set but empty is the placeholder, like the text values
fn parse_port(value: String) -> Result<u16, Error> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<u16>()
        .map_err(|_| Error::InvalidPort { value })
}

fn env_var(key: &'static str) -> Result<Option<String>, Error> {
    env_value(key, env::var(key))
}

fn env_value(
    key: &'static str,
    var: Result<String, VarError>,
) -> Result<Option<String>, Error> {
    match var {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            log::warn!("Ignoring configuration: {} is not valid UTF-8", key);
            Err(Error::NotUnicode { key })
        }
    }
}

impl From<Config<'_>> for OwnedConfig {
    fn from(config: Config<'_>) -> Self {
        Self {
            wifi_ssid: config.wifi_ssid.into(),
            wifi_psk: config.wifi_psk.into(),
            mqtt_hostname: config.mqtt_hostname.into(),
            mqtt_port: config.mqtt_port,
            mqtt_username: config.mqtt_username.into(),
            mqtt_password: config.mqtt_password.into(),
            topic_status: config.topic_status.into(),
            topic_moisture: config.topic_moisture.into(),
        }
    }
}

impl fmt::Debug for OwnedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_config(), f)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, ffi::OsString};

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_placeholder() {
        let config = OwnedConfig::from_lookup(|_| None).unwrap();
        assert!(config.as_config().is_placeholder());
        assert_eq!(config, OwnedConfig::default());
    }

    #[test]
    fn lookup_values_are_kept_verbatim() {
        let config = OwnedConfig::from_lookup(lookup_from(&[
            (ENV_WIFI_SSID, " Garden Net "),
            (ENV_WIFI_PSK, "pa\tss"),
            (ENV_MQTT_HOSTNAME, "Broker.Local"),
            (ENV_MQTT_USERNAME, "sensor"),
            (ENV_MQTT_PASSWORD, "s3cret\n"),
            (ENV_MQTT_PORT, "65535"),
            (ENV_TOPIC_STATUS, "garden/status"),
            (ENV_TOPIC_MOISTURE, "garden/moisture"),
        ]))
        .unwrap();

        assert_eq!(config.wifi_ssid, " Garden Net ");
        assert_eq!(config.wifi_psk, "pa\tss");
        assert_eq!(config.mqtt_hostname, "Broker.Local");
        assert_eq!(config.mqtt_username, "sensor");
        assert_eq!(config.mqtt_password, "s3cret\n");
        assert_eq!(config.mqtt_port, 65535);
        assert_eq!(config.topic_status, "garden/status");
        assert_eq!(config.topic_moisture, "garden/moisture");
    }

    #[test]
    fn partial_lookup_keeps_other_placeholders() {
        let config =
            OwnedConfig::from_lookup(lookup_from(&[(ENV_MQTT_HOSTNAME, "10.0.0.2")])).unwrap();
        assert_eq!(config.mqtt_hostname, "10.0.0.2");
        assert_eq!(config.mqtt_port, 0);
        assert!(config.wifi_ssid.is_empty());
    }

    #[test]
    fn empty_port_is_the_placeholder() {
        let config = OwnedConfig::from_lookup(lookup_from(&[(ENV_MQTT_PORT, "")])).unwrap();
        assert_eq!(config.mqtt_port, 0);

        let config = OwnedConfig::from_toml_str_with(
            "mqtt_port = 1883",
            lookup_from(&[(ENV_MQTT_PORT, "")]),
        )
        .unwrap();
        assert_eq!(config.mqtt_port, 0);
    }

    #[test]
    fn unparseable_port_is_an_error() {
        for bad in ["abc", "65536", "-1", " 1883"] {
            let err = OwnedConfig::from_lookup(lookup_from(&[(ENV_MQTT_PORT, bad)])).unwrap_err();
            match err {
                Error::InvalidPort { value } => assert_eq!(value, bad),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn parses_cfg_toml_schema() {
        let config = OwnedConfig::from_toml_str(
            r#"
            wifi_ssid = "garden"
            wifi_psk = "hunter22"
            mqtt_hostname = "broker.local"
            mqtt_port = 1883
            mqtt_username = "sensor"
            mqtt_password = "s3cret"
            topic_status = "garden/status"
            topic_moisture = "garden/moisture"
            "#,
        )
        .unwrap();
        assert_eq!(config.mqtt_port, 1883);
        assert_eq!(config.as_config().validate(), Ok(()));
    }

    #[test]
    fn toml_missing_keys_are_placeholders() {
        let config = OwnedConfig::from_toml_str("wifi_ssid = \"garden\"").unwrap();
        assert_eq!(config.wifi_ssid, "garden");
        assert_eq!(config.mqtt_port, 0);
        assert!(config.topic_moisture.is_empty());

        assert!(OwnedConfig::from_toml_str("").unwrap().as_config().is_placeholder());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            OwnedConfig::from_toml_str("mqtt_port = \"1883\""),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            OwnedConfig::from_toml_str("mqtt_port = 70000"),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            OwnedConfig::from_toml_str("wifi_ssid = "),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn lookup_overrides_toml() {
        let config = OwnedConfig::from_toml_str_with(
            "mqtt_hostname = \"file-host\"\nmqtt_port = 1883\nwifi_ssid = \"file-ssid\"",
            lookup_from(&[(ENV_MQTT_PORT, "8883"), (ENV_WIFI_SSID, "")]),
        )
        .unwrap();
        assert_eq!(config.mqtt_hostname, "file-host");
        assert_eq!(config.mqtt_port, 8883);
        // Set but empty still overrides
        assert_eq!(config.wifi_ssid, "");
    }

    #[test]
    fn env_values_keep_unset_and_reject_non_unicode() {
        assert_eq!(
            env_value(ENV_WIFI_PSK, Ok("pa ss".into())).unwrap(),
            Some("pa ss".to_string())
        );
        assert_eq!(env_value(ENV_WIFI_PSK, Err(VarError::NotPresent)).unwrap(), None);

        let not_unicode = Err(VarError::NotUnicode(OsString::from("pass")));
        match env_value(ENV_WIFI_PSK, not_unicode) {
            Err(Error::NotUnicode { key }) => assert_eq!(key, ENV_WIFI_PSK),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            OwnedConfig::from_file("/nonexistent/secrets/cfg.toml"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn converts_from_borrowed_config() {
        let view = Config {
            wifi_ssid: "garden",
            mqtt_port: 1883,
            ..Config::PLACEHOLDER
        };
        let owned = OwnedConfig::from(view);
        assert_eq!(owned.as_config(), view);
    }

    #[test]
    fn debug_redacts_passwords() {
        let config = OwnedConfig {
            wifi_psk: "hunter22".into(),
            mqtt_password: "s3cret".into(),
            ..OwnedConfig::default()
        };
        let out = format!("{config:?}");
        assert!(!out.contains("hunter22"));
        assert!(!out.contains("s3cret"));
    }
}
