//! Environment-driven configuration.
//!
//! Values come from process env after `.env.local` / `.env` have been
//! loaded from the project root. The API key may also live in the OS
//! keychain.

use crate::error::{CompanionError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash";
pub const DEFAULT_HOTKEY: &str = "Space";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const PROMPT_VERSION: &str = "v3-system-user-split";

/// Keychain service name for the stored API key.
pub const KEYRING_SERVICE: &str = "screen-companion";
const KEYRING_USER: &str = "gemini";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model_id: String,
    /// Accelerator for the global trigger, applied by the window shell.
    pub hotkey: String,
    /// Base URL of the model API, without trailing slash.
    pub api_base: String,
    /// Fallback endpoint tried when the direct call fails.
    pub relay_url: Option<String>,
    pub proxy: Option<String>,
    /// Holds `store.json` and `screenshots/`.
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let proxy = non_empty_var("HTTPS_PROXY").or_else(|| non_empty_var("HTTP_PROXY"));
        if let Some(p) = &proxy {
            log::info!("[CONFIG] Using proxy {}", p);
        }

        Self {
            api_key: resolve_api_key(),
            model_id: non_empty_var("MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            hotkey: non_empty_var("HOTKEY").unwrap_or_else(|| DEFAULT_HOTKEY.to_string()),
            api_base: non_empty_var("GEMINI_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            relay_url: non_empty_var("RELAY_URL"),
            proxy,
            data_dir: non_empty_var("COMPANION_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
        }
    }

    /// HTTP client honouring the configured proxy. Without one, no proxy
    /// is used at all (system proxy settings are ignored).
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let builder = reqwest::Client::builder();
        let builder = match &self.proxy {
            Some(url) => builder.proxy(reqwest::Proxy::all(url)?),
            None => builder.no_proxy(),
        };
        Ok(builder.build()?)
    }
}

/// `~/.local/share/screen-companion` or the platform equivalent.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("screen-companion")
}

/// Load `.env.local`, else `.env`, from `project_root`. First one found wins.
pub fn load_env_files(project_root: &Path) {
    for env_file in [".env.local", ".env"] {
        let path = project_root.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            return;
        }
    }
}

/// API key from `GOOGLE_API_KEY`, `GEMINI_API_KEY`, then the OS keychain.
fn resolve_api_key() -> Option<String> {
    if let Some(key) = non_empty_var("GOOGLE_API_KEY").or_else(|| non_empty_var("GEMINI_API_KEY")) {
        return Some(key);
    }

    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    match entry.get_password() {
        Ok(key) if !key.is_empty() => {
            log::info!("[CONFIG] Loaded API key from OS keychain");
            Some(key)
        }
        _ => None,
    }
}

/// Store the API key in the OS keychain for later runs. A blank key is
/// rejected before the keychain is touched.
pub fn save_api_key(api_key: &str) -> Result<()> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(CompanionError::MissingApiKey);
    }
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
    entry.set_password(api_key)?;
    log::info!("[CONFIG] API key saved to OS keychain");
    Ok(())
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
