//! Site configuration.
//!
//! Every timing constant and threshold of the site lives in [`SiteConfig`].
//! The defaults reproduce the shipped behavior; the frontend may override any
//! field from a JSON options object.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the site controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Gesture lockout after a section transition (ms).
    pub cooldown_ms: u64,

    /// Quiet period after the last wheel event before it is evaluated (ms).
    pub wheel_debounce_ms: u64,

    /// Wheel deltas with magnitude at or below this are ignored.
    pub wheel_min_delta: f64,

    /// Vertical swipe distance that counts as a gesture (px, exclusive).
    pub swipe_min_delta: f64,

    /// Number of magazine pages.
    pub magazine_pages: usize,

    /// Section id that hosts the magazine.
    pub magazine_section_id: String,

    /// Magazine section index used when no section carries `magazine_section_id`.
    pub magazine_fallback_index: usize,

    /// Time each page stays up during autoplay (ms).
    pub autoplay_cycle_ms: u64,

    /// Autoplay progress tick (ms). Must divide `autoplay_cycle_ms`.
    pub autoplay_tick_ms: u64,

    /// Number of decorative particles.
    pub particle_count: usize,

    /// Delay before the loading overlay is hidden (ms).
    pub loading_delay_ms: u64,

    /// Length of the easter egg animation (ms).
    pub easter_egg_ms: u64,

    /// Interval between adjacent-section preload hints (ms). `0` disables
    /// preloading.
    pub preload_interval_ms: u64,

    /// How long a preload hint stays applied (ms).
    pub preload_hold_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1200,
            wheel_debounce_ms: 100,
            wheel_min_delta: 10.0,
            swipe_min_delta: 50.0,
            magazine_pages: 7,
            magazine_section_id: "magazine".to_string(),
            magazine_fallback_index: 4,
            autoplay_cycle_ms: 4000,
            autoplay_tick_ms: 50,
            particle_count: 50,
            loading_delay_ms: 1500,
            easter_egg_ms: 3000,
            preload_interval_ms: 0,
            preload_hold_ms: 1000,
        }
    }
}

impl SiteConfig {
    /// Parse a JSON options object. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the state machines cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.magazine_pages == 0 {
            return Err(ConfigError::ZeroPages);
        }
        if self.autoplay_tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.autoplay_cycle_ms == 0 || self.autoplay_cycle_ms % self.autoplay_tick_ms != 0 {
            return Err(ConfigError::UnalignedCycle {
                tick_ms: self.autoplay_tick_ms,
                cycle_ms: self.autoplay_cycle_ms,
            });
        }
        Ok(())
    }

    /// Set the gesture cooldown.
    #[must_use]
    pub fn with_cooldown_ms(mut self, ms: u64) -> Self {
        self.cooldown_ms = ms;
        self
    }

    /// Set the number of magazine pages.
    #[must_use]
    pub fn with_magazine_pages(mut self, pages: usize) -> Self {
        self.magazine_pages = pages;
        self
    }

    /// Set the autoplay cycle and tick.
    #[must_use]
    pub fn with_autoplay(mut self, cycle_ms: u64, tick_ms: u64) -> Self {
        self.autoplay_cycle_ms = cycle_ms;
        self.autoplay_tick_ms = tick_ms;
        self
    }

    /// Set the number of particles.
    #[must_use]
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Enable adjacent-section preload hints every `interval_ms`.
    #[must_use]
    pub fn with_preload(mut self, interval_ms: u64, hold_ms: u64) -> Self {
        self.preload_interval_ms = interval_ms;
        self.preload_hold_ms = hold_ms;
        self
    }

    /// Preload interval, `None` when preloading is off.
    #[must_use]
    pub const fn preload_interval(&self) -> Option<Duration> {
        if self.preload_interval_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.preload_interval_ms))
        }
    }

    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    #[must_use]
    pub const fn wheel_debounce(&self) -> Duration {
        Duration::from_millis(self.wheel_debounce_ms)
    }
}

/// Invalid [`SiteConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The magazine needs at least one page.
    ZeroPages,
    /// Autoplay tick of zero would never advance.
    ZeroTick,
    /// Page turns only happen on exact multiples of the cycle.
    UnalignedCycle { tick_ms: u64, cycle_ms: u64 },
    /// Options object was not valid JSON for this schema.
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPages => write!(f, "magazine_pages must be at least 1"),
            Self::ZeroTick => write!(f, "autoplay_tick_ms must be non-zero"),
            Self::UnalignedCycle { tick_ms, cycle_ms } => write!(
                f,
                "autoplay cycle {cycle_ms}ms is not a positive multiple of tick {tick_ms}ms"
            ),
            Self::Json(msg) => write!(f, "invalid options: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
