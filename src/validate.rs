use core::fmt;

use crate::config::Config;
use crate::constants::{MQTT_STRING_MAX_LEN, WIFI_PSK_MAX_LEN, WIFI_SSID_MAX_LEN};
use crate::mqtt;

/// A configuration value that cannot be used. Each variant names the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Empty(&'static str),
    TooLong { field: &'static str, max: usize },
    PortOutOfRange,
    TopicWildcard(&'static str),
    InteriorNul(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty(field) => write!(f, "{field} must not be empty"),
            Error::TooLong { field, max } => write!(f, "{field} is longer than {max} bytes"),
            Error::PortOutOfRange => write!(f, "mqtt_port must be in 1..=65535"),
            Error::TopicWildcard(field) => {
                write!(f, "{field} must not contain the MQTT wildcards '+' or '#'")
            }
            Error::InteriorNul(field) => write!(f, "{field} contains a NUL byte"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), Error> {
    if value.len() > max {
        return Err(Error::TooLong { field, max });
    }
    Ok(())
}

pub(crate) fn check_non_empty(field: &'static str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::Empty(field));
    }
    Ok(())
}

impl Config<'_> {
    /// Fails fast on values that cannot work: unset SSID, hostname, port or
    /// topics, values over the Wi-Fi or MQTT length limits, wildcard topics
    /// and embedded NUL bytes.
    ///
    /// Passwords and the MQTT username may be empty (open networks,
    /// anonymous brokers).
    pub fn validate(&self) -> Result<(), Error> {
        self.check().inspect_err(|e| log::debug!("Configuration rejected: {}", e))
    }

    fn check(&self) -> Result<(), Error> {
        check_non_empty("wifi_ssid", self.wifi_ssid)?;
        check_len("wifi_ssid", self.wifi_ssid, WIFI_SSID_MAX_LEN)?;
        check_len("wifi_psk", self.wifi_psk, WIFI_PSK_MAX_LEN)?;

        check_non_empty("mqtt_hostname", self.mqtt_hostname)?;
        check_len("mqtt_hostname", self.mqtt_hostname, MQTT_STRING_MAX_LEN)?;

        if self.mqtt_port == 0 {
            return Err(Error::PortOutOfRange);
        }

        check_len("mqtt_username", self.mqtt_username, MQTT_STRING_MAX_LEN)?;
        check_len("mqtt_password", self.mqtt_password, MQTT_STRING_MAX_LEN)?;

        mqtt::check_topic_name("topic_status", self.topic_status)?;
        mqtt::check_topic_name("topic_moisture", self.topic_moisture)?;

        for (field, value) in self.text_fields() {
            if value.contains('\0') {
                return Err(Error::InteriorNul(field));
            }
        }

        Ok(())
    }
}
