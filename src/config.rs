use core::fmt;

use crate::constants::REDACTED;

/// Secrets needed to join the Wi-Fi network and publish to the MQTT broker.
///
/// Borrowed so the same type serves the compiled-in [`CONFIG`] and views of
/// runtime-loaded values. There are no setters: build a new value instead.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Config<'a> {
    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'a str,

    // Wi-Fi pre-shared key (password)
    pub wifi_psk: &'a str,

    // MQTT broker hostname or IP address
    pub mqtt_hostname: &'a str,

    // MQTT port (usually 1883 or 8883 for TLS)
    pub mqtt_port: u16,

    // MQTT username for authentication
    pub mqtt_username: &'a str,

    // MQTT password for authentication
    pub mqtt_password: &'a str,

    // MQTT topic the device status is published to
    pub topic_status: &'a str,

    // MQTT topic moisture readings are published to
    pub topic_moisture: &'a str,
}

impl<'a> Config<'a> {
    /// Every text value empty, port zero.
    pub const PLACEHOLDER: Config<'a> = Config {
        wifi_ssid: "",
        wifi_psk: "",
        mqtt_hostname: "",
        mqtt_port: 0,
        mqtt_username: "",
        mqtt_password: "",
        topic_status: "",
        topic_moisture: "",
    };

    /// True when nothing has been filled in yet.
    pub fn is_placeholder(&self) -> bool {
        *self == Config::PLACEHOLDER
    }

    /// Text values paired with their field name, in declaration order.
    pub(crate) fn text_fields(&self) -> [(&'static str, &'a str); 7] {
        [
            ("wifi_ssid", self.wifi_ssid),
            ("wifi_psk", self.wifi_psk),
            ("mqtt_hostname", self.mqtt_hostname),
            ("mqtt_username", self.mqtt_username),
            ("mqtt_password", self.mqtt_password),
            ("topic_status", self.topic_status),
            ("topic_moisture", self.topic_moisture),
        ]
    }
}

impl Default for Config<'_> {
    fn default() -> Self {
        Config::PLACEHOLDER
    }
}

fn redact(secret: &str) -> &str {
    if secret.is_empty() {
        secret
    } else {
        REDACTED
    }
}

impl fmt::Debug for Config<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("wifi_ssid", &self.wifi_ssid)
            .field("wifi_psk", &redact(self.wifi_psk))
            .field("mqtt_hostname", &self.mqtt_hostname)
            .field("mqtt_port", &self.mqtt_port)
            .field("mqtt_username", &self.mqtt_username)
            .field("mqtt_password", &redact(self.mqtt_password))
            .field("topic_status", &self.topic_status)
            .field("topic_moisture", &self.topic_moisture)
            .finish()
    }
}

/// File `CONFIG` was generated from, whether or not it existed at build time.
pub const CONFIG_SOURCE: &str = env!("SECRETS_CFG_RESOLVED");

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));
