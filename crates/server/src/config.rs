use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;

pub const DEFAULT_CACHE_CONTROL: &str = "max-age=0, s-maxage=1800";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub data_path: PathBuf,
    pub catalog_name: String,
    pub cache_control: String,
    pub server_public_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            data_path: PathBuf::from("./data/basquiat.json"),
            catalog_name: "basquiat".into(),
            cache_control: DEFAULT_CACHE_CONTROL.into(),
            server_public_url: None,
        }
    }
}

impl Settings {
    /// Base URL the endpoint is reachable at, for log output.
    pub fn public_url(&self) -> String {
        self.server_public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.server_bind))
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

/// `server.toml` is a flat table of strings; unknown keys are ignored and an
/// unparsable file changes nothing.
pub fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("data_path") {
        settings.data_path = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("catalog_name") {
        settings.catalog_name = v.clone();
    }
    if let Some(v) = file_cfg.get("cache_control") {
        settings.cache_control = v.clone();
    }
    if let Some(v) = file_cfg.get("server_public_url") {
        settings.server_public_url = Some(v.clone());
    }
}

/// Later names win: `APP__*` overrides the short form.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["SERVER_BIND", "APP__BIND_ADDR"] {
        if let Some(v) = lookup(key) {
            settings.server_bind = v;
        }
    }

    for key in ["ARTWORK_DATA_PATH", "APP__DATA_PATH"] {
        if let Some(v) = lookup(key) {
            settings.data_path = PathBuf::from(v);
        }
    }

    if let Some(v) = lookup("APP__CATALOG_NAME") {
        let v = v.trim().trim_matches('/');
        if !v.is_empty() {
            settings.catalog_name = v.to_string();
        }
    }

    if let Some(v) = lookup("APP__CACHE_CONTROL") {
        settings.cache_control = v;
    }

    if let Some(v) = lookup("SERVER_PUBLIC_URL") {
        settings.server_public_url = Some(v.trim_end_matches('/').to_string());
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
