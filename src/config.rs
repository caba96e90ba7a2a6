//! Runtime configuration for the client.
//!
//! The API base comes from `<meta name="api-base">` in `index.html` and can be
//! overridden per browser through local storage (handy when pointing a
//! deployed build at a local backend).

use gloo::storage::{LocalStorage, Storage};

pub const API_BASE_KEY: &str = "as_api_base";
pub const DEBUG_KEY: &str = "as_debug";
pub const DEFAULT_API_BASE: &str = "/api";
pub const SUMMARY_POLL_MS: u32 = 30_000;
pub const DROPZONE_POLL_MS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    /// Lobby summary + selected game results refresh cadence.
    pub summary_poll_ms: u32,
    /// Dropzone occupancy refresh cadence.
    pub dropzone_poll_ms: u32,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            summary_poll_ms: SUMMARY_POLL_MS,
            dropzone_poll_ms: DROPZONE_POLL_MS,
            debug: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let meta = gloo::utils::document()
            .query_selector("meta[name='api-base']")
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute("content"));
        let store = LocalStorage::raw();
        let stored_base = store.get_item(API_BASE_KEY).ok().flatten();
        let stored_debug = store.get_item(DEBUG_KEY).ok().flatten();
        Self::from_sources(meta, stored_base, stored_debug)
    }

    /// Later sources win: meta tag, then local storage override.
    pub fn from_sources(
        meta_base: Option<String>,
        stored_base: Option<String>,
        stored_debug: Option<String>,
    ) -> Self {
        let api_base = [stored_base, meta_base]
            .into_iter()
            .flatten()
            .map(|raw| normalize_base(&raw))
            .find(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base,
            debug: stored_debug.as_deref().map(parse_flag).unwrap_or(false),
            ..Default::default()
        }
    }
}

pub fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

pub fn parse_flag(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_configured() {
        let cfg = AppConfig::from_sources(None, None, None);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.summary_poll_ms, 30_000);
        assert_eq!(cfg.dropzone_poll_ms, 3_000);
    }

    #[test]
    fn storage_override_beats_meta() {
        let cfg = AppConfig::from_sources(
            Some("https://scrims.example/api/".into()),
            Some("http://localhost:5000".into()),
            None,
        );
        assert_eq!(cfg.api_base, "http://localhost:5000");
    }

    #[test]
    fn blank_override_falls_back_to_meta() {
        let cfg = AppConfig::from_sources(Some("/backend/".into()), Some("  ".into()), None);
        assert_eq!(cfg.api_base, "/backend");
    }

    #[test]
    fn debug_flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
        let cfg = AppConfig::from_sources(None, None, Some("true".into()));
        assert!(cfg.debug);
    }
}
