#![forbid(unsafe_code)]

//! WASM frontend for the Rinkside club site.
//!
//! This crate is host-specific (web/WASM). It provides a stable `wasm-bindgen`
//! API surface for:
//! - mounting the site controller on an already-rendered page,
//! - capturing wheel/key/touch/click input and feeding it to `rinkside-core`,
//! - projecting core state onto the DOM (classes, inline styles, labels),
//! - routing `tracing` output to the browser console.
//!
//! [`input`], [`logging`] and [`markup`] are host-agnostic and compile (and are
//! tested) on every target.

pub mod input;
pub mod logging;
pub mod markup;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::RinksideSite;

use serde::Deserialize;

use rinkside_core::{ConfigError, SiteConfig};

/// Options accepted by the JS constructor.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebOptions {
    #[serde(flatten)]
    pub site: SiteConfig,
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: Option<String>,
}

impl WebOptions {
    /// Parse the `JSON.stringify`-ed options object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        options.site.validate()?;
        Ok(options)
    }

    /// Logging configuration implied by these options.
    #[must_use]
    pub fn log_config(&self) -> logging::LogConfig {
        let level = self
            .log_level
            .as_deref()
            .and_then(|s| s.parse::<tracing::Level>().ok())
            .unwrap_or(tracing::Level::INFO);
        logging::LogConfig::default().with_max_level(level)
    }
}

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct RinksideSite;

#[cfg(not(target_arch = "wasm32"))]
impl RinksideSite {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn options_flatten_site_config() {
        let options =
            WebOptions::from_json(r#"{"cooldownMs":800,"logLevel":"debug"}"#).unwrap();
        assert_eq!(options.site.cooldown_ms, 800);
        assert_eq!(options.site.magazine_pages, 7);
        assert_eq!(options.log_config().max_level, tracing::Level::DEBUG);
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let options = WebOptions::from_json(r#"{"logLevel":"loud"}"#).unwrap();
        assert_eq!(options.log_config().max_level, tracing::Level::INFO);
    }

    #[test]
    fn invalid_site_config_is_reported() {
        assert_eq!(
            WebOptions::from_json(r#"{"magazinePages":0}"#),
            Err(ConfigError::ZeroPages)
        );
    }
}
