use core::fmt;
use core::str::FromStr;

use heapless::String;

use crate::config::Config;
use crate::constants::{REDACTED, WIFI_PSK_MAX_LEN, WIFI_SSID_MAX_LEN};
use crate::validate::Error;

/// Wi-Fi credentials in the fixed-capacity strings station configs expect.
#[derive(Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: String<WIFI_SSID_MAX_LEN>,
    pub password: String<WIFI_PSK_MAX_LEN>,
}

impl Config<'_> {
    pub fn wifi_credentials(&self) -> Result<WifiCredentials, Error> {
        let ssid = String::<WIFI_SSID_MAX_LEN>::from_str(self.wifi_ssid).map_err(|_| {
            Error::TooLong {
                field: "wifi_ssid",
                max: WIFI_SSID_MAX_LEN,
            }
        })?;
        let password = String::<WIFI_PSK_MAX_LEN>::from_str(self.wifi_psk).map_err(|_| {
            Error::TooLong {
                field: "wifi_psk",
                max: WIFI_PSK_MAX_LEN,
            }
        })?;

        log::debug!("Using Wi-Fi credentials for SSID: {:?}", self.wifi_ssid);

        Ok(WifiCredentials { ssid, password })
    }
}

impl fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { REDACTED };
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid.as_str())
            .field("password", &password)
            .finish()
    }
}
