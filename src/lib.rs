//! Wi-Fi and MQTT secrets for the soil moisture sensor.
//!
//! The values are compiled in from `cfg.toml` (see `cfg.toml.example`) and
//! exposed as [`CONFIG`]. With the `std` feature they can instead be loaded at
//! runtime from the environment or a TOML file through [`OwnedConfig`].
//!
//! Nothing here validates on load. Call [`Config::validate`] at startup to
//! fail fast on placeholder or malformed values.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod config;
pub mod constants;
pub mod cstr;
pub mod mqtt;
#[cfg(feature = "std")]
pub mod owned;
pub mod validate;
pub mod wifi;

pub use config::{Config, CONFIG};
#[cfg(feature = "std")]
pub use owned::OwnedConfig;
pub use validate::Error;
pub use wifi::WifiCredentials;
