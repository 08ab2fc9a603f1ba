use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "lawdesk.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint_url: String,
    pub document_base_url: String,
    pub document_path: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:80".into(),
            document_base_url: "http://localhost:3000".into(),
            document_path: "/laws.pdf".into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint_url: Option<String>,
    document_base_url: Option<String>,
    document_path: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Absolute locator of the corpus document, for viewers that cannot
    /// resolve site-relative paths themselves.
    pub fn document_url(&self) -> String {
        match Url::parse(&self.document_base_url).and_then(|base| base.join(&self.document_path)) {
            Ok(url) => url.to_string(),
            Err(err) => {
                warn!(
                    base = %self.document_base_url,
                    path = %self.document_path,
                    "could not resolve document url, using path as-is: {err}"
                );
                self.document_path.clone()
            }
        }
    }
}

/// Defaults, then `lawdesk.toml` (or `$LAWDESK_CONFIG`), then environment.
pub fn load_settings() -> ClientSettings {
    let path = std::env::var("LAWDESK_CONFIG").unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.into());
    load_settings_from(Path::new(&path), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.endpoint_url {
                    settings.endpoint_url = v;
                }
                if let Some(v) = file_cfg.document_base_url {
                    settings.document_base_url = v;
                }
                if let Some(v) = file_cfg.document_path {
                    settings.document_path = v;
                }
                if file_cfg.request_timeout_secs.is_some() {
                    settings.request_timeout_secs = file_cfg.request_timeout_secs;
                }
            }
            Err(err) => warn!(path = %path.display(), "ignoring unreadable settings file: {err}"),
        }
    }

    if let Some(v) = env("LAWDESK_ENDPOINT_URL") {
        settings.endpoint_url = v;
    }
    if let Some(v) = env("APP__ENDPOINT_URL") {
        settings.endpoint_url = v;
    }

    if let Some(v) = env("LAWDESK_DOCUMENT_BASE_URL") {
        settings.document_base_url = v;
    }
    if let Some(v) = env("APP__DOCUMENT_BASE_URL") {
        settings.document_base_url = v;
    }

    if let Some(v) = env("APP__DOCUMENT_PATH") {
        settings.document_path = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    settings
}
