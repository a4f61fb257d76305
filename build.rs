use std::{env, error::Error, fs, path::PathBuf};

use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    wifi_ssid: String,
    wifi_psk: String,
    mqtt_hostname: String,
    mqtt_port: u16,
    mqtt_username: String,
    mqtt_password: String,
    topic_status: String,
    topic_moisture: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed=SECRETS_CFG_PATH");

    // Relative paths are taken from the manifest dir, where build scripts run
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let path = match env::var("SECRETS_CFG_PATH") {
        Ok(path) => manifest_dir.join(path),
        Err(_) => manifest_dir.join("cfg.toml"),
    };
    println!("cargo:rustc-env=SECRETS_CFG_RESOLVED={}", path.display());

    // Tell Cargo to rerun if toml changes (also picks up the file being created later)
    println!("cargo:rerun-if-changed={}", path.display());

    let raw: RawConfig = match fs::read_to_string(&path) {
        Ok(toml_str) => toml::from_str(&toml_str)?,
        Err(_) => {
            println!(
                "cargo:warning={} not found, compiling placeholder secrets",
                path.display()
            );
            RawConfig::default()
        }
    };

    // Generate Rust code
    let out_dir = env::var("OUT_DIR")?;
    let dest_path = PathBuf::from(out_dir).join("config.rs");
    let code = format!(
        r#"
        pub const CONFIG: Config<'static> = Config {{
            wifi_ssid: {ssid:?},
            wifi_psk: {psk:?},
            mqtt_hostname: {mh:?},
            mqtt_port: {mp},
            mqtt_username: {mu:?},
            mqtt_password: {mpw:?},
            topic_status: {ts:?},
            topic_moisture: {tm:?},
        }};
    "#,
        ssid = raw.wifi_ssid,
        psk = raw.wifi_psk,
        mh = raw.mqtt_hostname,
        mp = raw.mqtt_port,
        mu = raw.mqtt_username,
        mpw = raw.mqtt_password,
        ts = raw.topic_status,
        tm = raw.topic_moisture,
    );

    fs::write(dest_path, code)?;
    Ok(())
}
