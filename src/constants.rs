/// Longest SSID 802.11 allows, in bytes
pub const WIFI_SSID_MAX_LEN: usize = 32;
/// Longest WPA2 pre-shared key: 63 char passphrase or 64 hex digits
pub const WIFI_PSK_MAX_LEN: usize = 64;

/// Longest UTF-8 string an MQTT packet can carry (two byte length prefix)
pub const MQTT_STRING_MAX_LEN: usize = 65535;

// Environment variables read by `OwnedConfig::from_env`
pub const ENV_WIFI_SSID: &str = "SECRETS_WIFI_SSID";
pub const ENV_WIFI_PSK: &str = "SECRETS_WIFI_PSK";
pub const ENV_MQTT_HOSTNAME: &str = "SECRETS_MQTT_HOSTNAME";
pub const ENV_MQTT_USERNAME: &str = "SECRETS_MQTT_USERNAME";
pub const ENV_MQTT_PASSWORD: &str = "SECRETS_MQTT_PASSWORD";
pub const ENV_MQTT_PORT: &str = "SECRETS_MQTT_PORT";
pub const ENV_TOPIC_STATUS: &str = "SECRETS_TOPIC_STATUS";
pub const ENV_TOPIC_MOISTURE: &str = "SECRETS_TOPIC_MOISTURE";

/// Text printed in place of a non-empty password by `Debug`
pub const REDACTED: &str = "***";
