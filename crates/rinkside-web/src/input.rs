#![forbid(unsafe_code)]

//! Normalized, JSON-friendly input schema for `rinkside-web` and the
//! dispatcher that applies it to a [`Site`].
//!
//! The DOM layer converts each browser event into a [`SiteInput`], calls
//! [`dispatch`], and then carries out the returned [`Reaction`]: prevent the
//! default action, re-render, start or cancel timers. Keeping this step free
//! of `web-sys` means the whole controller can be driven (and tested) with
//! plain values, and scripted from JS through `RinksideSite.input`.

use core::time::Duration;

use rinkside_core::magazine::{AutoplayToken, Toggled};
use rinkside_core::particles::PlayState;
use rinkside_core::site::NavOutcome;
use rinkside_core::{Rejected, Site};
use serde::{Deserialize, Serialize};

/// One browser-level input, already stripped of DOM types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SiteInput {
    /// `wheel` on the window.
    Wheel { delta_y: f64 },
    /// The wheel debounce timer fired.
    WheelSettled,
    /// `keydown`; `key` is `KeyboardEvent.key`.
    Key { key: String },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    /// Click on section nav dot `index`.
    NavDot { index: usize },
    /// Click on an in-page link with this `href` attribute.
    Anchor { href: String },
    MagazinePrev,
    MagazineNext,
    /// Click on magazine indicator `index`.
    MagazineDot { index: usize },
    AutoplayToggle,
    /// The autoplay interval for run `token` fired.
    #[serde(skip)]
    AutoplayTick { token: AutoplayToken },
    /// `visibilitychange`.
    Visibility { hidden: bool },
}

impl SiteInput {
    /// Parse one input from JSON, e.g. `{"kind":"key","key":"ArrowDown"}`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Change to the autoplay interval the host must make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayTimer {
    /// Start a periodic timer delivering `AutoplayTick { token }`.
    Start { token: AutoplayToken, every_ms: u64 },
    /// Cancel the running timer.
    Cancel,
}

/// What the host must do after a dispatch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reaction {
    pub prevent_default: bool,
    /// Re-render sections, nav dots and the theme color.
    pub render_sections: bool,
    /// Re-render the magazine strip, page label, indicators and prev/next.
    pub render_magazine: bool,
    /// Rewrite the autoplay button label (autoplay started or stopped).
    pub render_autoplay_button: bool,
    /// Update only the autoplay progress bar width.
    pub render_progress: bool,
    pub autoplay_timer: Option<AutoplayTimer>,
    /// (Re)arm the wheel debounce timer with this delay.
    pub wheel_timer: Option<Duration>,
    pub easter_egg: bool,
    pub particles: Option<PlayState>,
}

impl Reaction {
    fn navigation(&mut self, result: Result<NavOutcome, Rejected>) {
        if let Ok(outcome) = result {
            self.render_sections = true;
            if outcome.autoplay_stopped {
                self.autoplay_stopped();
            }
        }
    }

    fn magazine_changed(&mut self, autoplay_stopped: bool) {
        self.render_magazine = true;
        if autoplay_stopped {
            self.autoplay_stopped();
        }
    }

    fn autoplay_stopped(&mut self) {
        self.autoplay_timer = Some(AutoplayTimer::Cancel);
        self.render_autoplay_button = true;
        self.render_progress = true;
    }
}

/// Apply one input to the site at host time `now`.
pub fn dispatch(site: &mut Site, input: SiteInput, now: Duration) -> Reaction {
    site.tick(now);
    let mut reaction = Reaction::default();

    match input {
        SiteInput::Wheel { delta_y } => {
            reaction.prevent_default = true;
            let due = site.on_wheel(delta_y, now);
            reaction.wheel_timer = Some(due.saturating_sub(now));
        }
        SiteInput::WheelSettled => match site.on_wheel_settled(now) {
            Some(result) => reaction.navigation(result),
            // Browser timers may fire a little early; wait out the rest.
            None => {
                reaction.wheel_timer = site.wheel_deadline().map(|due| due.saturating_sub(now));
            }
        },
        SiteInput::Key { key } => {
            let outcome = site.on_key(&key, now);
            reaction.prevent_default = outcome.prevent_default;
            reaction.easter_egg = outcome.easter_egg;
            if let Some(result) = outcome.navigation {
                reaction.navigation(result);
            }
        }
        SiteInput::TouchStart { y } => site.on_touch_start(y),
        SiteInput::TouchMove { y } => {
            if let Some(result) = site.on_touch_move(y, now) {
                reaction.prevent_default = true;
                reaction.navigation(result);
            }
        }
        SiteInput::NavDot { index } => {
            let result = site.on_nav_dot(index, now);
            reaction.navigation(result);
        }
        SiteInput::Anchor { href } => {
            reaction.prevent_default = true;
            if let Some(result) = site.on_anchor(&href, now) {
                reaction.navigation(result);
            }
        }
        SiteInput::MagazinePrev => {
            if let Some(magazine) = site.magazine_mut() {
                let stopped = magazine.previous();
                reaction.magazine_changed(stopped);
            }
        }
        SiteInput::MagazineNext => {
            if let Some(magazine) = site.magazine_mut() {
                let stopped = magazine.next();
                reaction.magazine_changed(stopped);
            }
        }
        SiteInput::MagazineDot { index } => {
            if let Some(magazine) = site.magazine_mut()
                && magazine.go_to_page(index)
            {
                reaction.render_magazine = true;
            }
        }
        SiteInput::AutoplayToggle => {
            if let Some(magazine) = site.magazine_mut() {
                reaction.render_autoplay_button = true;
                reaction.render_progress = true;
                reaction.autoplay_timer = Some(match magazine.toggle_autoplay() {
                    Toggled::Started(token) => AutoplayTimer::Start {
                        token,
                        every_ms: magazine.tick_ms(),
                    },
                    Toggled::Stopped => AutoplayTimer::Cancel,
                });
            }
        }
        SiteInput::AutoplayTick { token } => {
            if let Some(tick) = site.magazine_mut().and_then(|m| m.tick(token)) {
                reaction.render_progress = true;
                reaction.render_magazine = tick.turned_to.is_some();
            }
        }
        SiteInput::Visibility { hidden } => {
            reaction.particles = Some(PlayState::for_hidden(hidden));
        }
    }

    reaction
}
