use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use tracing::warn;
use url::Url;

const SETTINGS_FILE: &str = "site.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub submit_delay_ms: u64,
    pub max_open_orders: usize,
    pub max_body_bytes: usize,
    pub static_dir: PathBuf,
    pub public_url: Option<Url>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            submit_delay_ms: 900,
            max_open_orders: 1024,
            max_body_bytes: 64 * 1024,
            static_dir: PathBuf::from("./static"),
            public_url: None,
        }
    }
}

impl Settings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    fn apply_file_values(&mut self, file_cfg: &HashMap<String, String>) {
        if let Some(v) = file_cfg.get("bind_addr") {
            self.server_bind = v.clone();
        }
        if let Some(v) = file_cfg.get("submit_delay_ms") {
            set_parsed(&mut self.submit_delay_ms, "submit_delay_ms", v);
        }
        if let Some(v) = file_cfg.get("max_open_orders") {
            set_parsed(&mut self.max_open_orders, "max_open_orders", v);
        }
        if let Some(v) = file_cfg.get("max_body_bytes") {
            set_parsed(&mut self.max_body_bytes, "max_body_bytes", v);
        }
        if let Some(v) = file_cfg.get("static_dir") {
            self.static_dir = PathBuf::from(v);
        }
        if let Some(v) = file_cfg.get("public_url") {
            self.set_public_url(v);
        }
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SERVER_BIND") {
            self.server_bind = v;
        }
        if let Some(v) = lookup("SITE__BIND_ADDR") {
            self.server_bind = v;
        }
        if let Some(v) = lookup("SITE__SUBMIT_DELAY_MS") {
            set_parsed(&mut self.submit_delay_ms, "SITE__SUBMIT_DELAY_MS", &v);
        }
        if let Some(v) = lookup("SITE__MAX_OPEN_ORDERS") {
            set_parsed(&mut self.max_open_orders, "SITE__MAX_OPEN_ORDERS", &v);
        }
        if let Some(v) = lookup("SITE__MAX_BODY_BYTES") {
            set_parsed(&mut self.max_body_bytes, "SITE__MAX_BODY_BYTES", &v);
        }
        if let Some(v) = lookup("SITE__STATIC_DIR") {
            self.static_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SITE__PUBLIC_URL") {
            self.set_public_url(&v);
        }
    }

    fn set_public_url(&mut self, raw: &str) {
        match Url::parse(raw.trim()) {
            Ok(url) => self.public_url = Some(url),
            Err(error) => warn!(raw, %error, "ignoring invalid public_url"),
        }
    }
}

fn set_parsed<T: std::str::FromStr>(slot: &mut T, key: &str, raw: &str) {
    match raw.trim().parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!(key, raw, "ignoring unparseable setting"),
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => settings.apply_file_values(&file_cfg),
            Err(error) => warn!(file = SETTINGS_FILE, %error, "failed to parse settings file"),
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
