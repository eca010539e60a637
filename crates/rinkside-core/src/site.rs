//! Application state for the whole site.
//!
//! [`Site`] owns every state machine and is the only thing the frontend
//! mutates. Each `on_*` method corresponds to one browser event and returns
//! what the frontend needs to know to update the page; the page itself is
//! always re-rendered from [`SectionNavigator::view`] and
//! [`MagazinePaginator::view`].

use core::time::Duration;

use crate::config::{ConfigError, SiteConfig};
use crate::gesture::{NavIntent, SwipeTracker, WheelDebouncer, key_intent};
use crate::konami::KonamiListener;
use crate::magazine::MagazinePaginator;
use crate::navigator::{Rejected, SectionNavigator, Transition};

/// A completed section change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOutcome {
    pub transition: Transition,
    /// Autoplay was running and got stopped because the magazine was left.
    pub autoplay_stopped: bool,
}

/// What a `keydown` did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The key is a navigation key; suppress the browser's default scroll.
    pub prevent_default: bool,
    pub navigation: Option<Result<NavOutcome, Rejected>>,
    /// The key completed the konami sequence.
    pub easter_egg: bool,
}

/// Site controller state.
#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    navigator: SectionNavigator,
    magazine: Option<MagazinePaginator>,
    magazine_section: usize,
    wheel: WheelDebouncer,
    swipe: SwipeTracker,
    konami: KonamiListener,
}

impl Site {
    /// Build the site over the given section ids.
    ///
    /// `with_magazine` is false when the page has no magazine strip; the
    /// magazine feature is then disabled entirely.
    pub fn new(
        config: SiteConfig,
        section_ids: Vec<String>,
        with_magazine: bool,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let magazine_section = section_ids
            .iter()
            .position(|id| *id == config.magazine_section_id)
            .unwrap_or(config.magazine_fallback_index);
        let magazine = with_magazine.then(|| {
            MagazinePaginator::new(
                config.magazine_pages,
                config.autoplay_cycle_ms,
                config.autoplay_tick_ms,
            )
        });

        Ok(Self {
            navigator: SectionNavigator::new(section_ids, config.cooldown()),
            magazine,
            magazine_section,
            wheel: WheelDebouncer::new(config.wheel_debounce(), config.wheel_min_delta),
            swipe: SwipeTracker::new(config.swipe_min_delta),
            konami: KonamiListener::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn navigator(&self) -> &SectionNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn magazine(&self) -> Option<&MagazinePaginator> {
        self.magazine.as_ref()
    }

    pub fn magazine_mut(&mut self) -> Option<&mut MagazinePaginator> {
        self.magazine.as_mut()
    }

    /// Index of the section hosting the magazine.
    #[must_use]
    pub const fn magazine_section(&self) -> usize {
        self.magazine_section
    }

    /// Release the navigation cooldown if its deadline has passed.
    pub fn tick(&mut self, now: Duration) {
        self.navigator.tick(now);
    }

    /// Apply a navigation intent.
    pub fn navigate(&mut self, intent: &NavIntent, now: Duration) -> Result<NavOutcome, Rejected> {
        match self.navigator.navigate(intent, now) {
            Ok(transition) => {
                let autoplay_stopped = transition.to != self.magazine_section
                    && self
                        .magazine
                        .as_mut()
                        .is_some_and(MagazinePaginator::stop_autoplay);
                tracing::info!(
                    "navigating to section {}: {}",
                    transition.to,
                    self.navigator.current_id().unwrap_or("unknown")
                );
                Ok(NavOutcome {
                    transition,
                    autoplay_stopped,
                })
            }
            Err(rejected) => {
                tracing::debug!(?intent, reason = %rejected, "navigation ignored");
                Err(rejected)
            }
        }
    }

    /// `wheel`: queue the event. Returns when [`on_wheel_settled`](Self::on_wheel_settled)
    /// should run.
    pub fn on_wheel(&mut self, delta_y: f64, now: Duration) -> Duration {
        self.wheel.push(delta_y, now)
    }

    /// When the pending wheel event becomes due, if any.
    #[must_use]
    pub fn wheel_deadline(&self) -> Option<Duration> {
        self.wheel.deadline()
    }

    /// Debounce timer fired: evaluate the last wheel event of the burst.
    pub fn on_wheel_settled(&mut self, now: Duration) -> Option<Result<NavOutcome, Rejected>> {
        let intent = self.wheel.fire(now)?;
        Some(self.navigate(&intent, now))
    }

    /// `keydown`.
    pub fn on_key(&mut self, key: &str, now: Duration) -> KeyOutcome {
        let easter_egg = self.konami.push(key);
        if easter_egg {
            tracing::info!("konami code entered");
        }
        match key_intent(key) {
            Some(intent) => KeyOutcome {
                prevent_default: true,
                navigation: Some(self.navigate(&intent, now)),
                easter_egg,
            },
            None => KeyOutcome {
                easter_egg,
                ..KeyOutcome::default()
            },
        }
    }

    /// `touchstart`.
    pub fn on_touch_start(&mut self, y: f64) {
        self.swipe.start(y);
    }

    /// `touchmove`. `Some` means a swipe was recognized and the default
    /// should be prevented.
    pub fn on_touch_move(&mut self, y: f64, now: Duration) -> Option<Result<NavOutcome, Rejected>> {
        if self.navigator.is_cooling(now) {
            return None;
        }
        let intent = self.swipe.moved(y)?;
        Some(self.navigate(&intent, now))
    }

    /// Click on nav dot `index`.
    pub fn on_nav_dot(&mut self, index: usize, now: Duration) -> Result<NavOutcome, Rejected> {
        self.navigate(&NavIntent::To(index), now)
    }

    /// Click on an in-page link. `None` when `href` is not a fragment link.
    pub fn on_anchor(&mut self, href: &str, now: Duration) -> Option<Result<NavOutcome, Rejected>> {
        let intent = NavIntent::from_href(href)?;
        Some(self.navigate(&intent, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::konami::KONAMI_SEQUENCE;
    use pretty_assertions::assert_eq;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Move `now` forward by `ms` and return it.
    fn step(now: &mut Duration, ms: u64) -> Duration {
        *now += Duration::from_millis(ms);
        *now
    }

    fn club_site() -> Site {
        Site::new(
            SiteConfig::default(),
            ids(&["home", "team", "schedule", "sponsors", "magazine", "contact"]),
            true,
        )
        .unwrap()
    }

    #[test]
    fn wheel_scenario_moves_one_section_after_debounce() {
        let mut site = Site::new(
            SiteConfig::default(),
            ids(&["home", "team", "schedule", "sponsors", "contact"]),
            true,
        )
        .unwrap();
        let mut now = Duration::ZERO;

        let due = site.on_wheel(50.0, now);
        assert_eq!(due, Duration::from_millis(100));
        assert_eq!(site.on_wheel_settled(step(&mut now, 99)), None);
        assert_eq!(site.navigator().current(), 0);

        let outcome = site.on_wheel_settled(step(&mut now, 1)).unwrap().unwrap();
        assert_eq!(outcome.transition, Transition { from: 0, to: 1 });
        let view = site.navigator().view();
        assert!(view.is_active(1));
        assert!(!view.is_active(0));
        assert_eq!(view.theme_color, "#219ebc");
    }

    #[test]
    fn wheel_during_cooldown_is_swallowed() {
        let mut site = club_site();
        site.on_nav_dot(2, Duration::ZERO).unwrap();
        site.on_wheel(120.0, Duration::from_millis(200));
        assert_eq!(
            site.on_wheel_settled(Duration::from_millis(300)),
            Some(Err(Rejected::Cooling {
                remaining: Duration::from_millis(900)
            }))
        );
        assert_eq!(site.navigator().current(), 2);
    }

    #[test]
    fn leaving_magazine_stops_autoplay() {
        let mut site = club_site();
        assert_eq!(site.magazine_section(), 4);
        site.on_nav_dot(4, Duration::ZERO).unwrap();
        site.magazine_mut().unwrap().start_autoplay().unwrap();

        let outcome = site.on_key("ArrowDown", Duration::from_secs(2));
        let nav = outcome.navigation.unwrap().unwrap();
        assert!(outcome.prevent_default);
        assert_eq!(nav.transition.to, 5);
        assert!(nav.autoplay_stopped);
        assert!(!site.magazine().unwrap().is_running());
    }

    #[test]
    fn entering_magazine_keeps_autoplay() {
        let mut site = club_site();
        site.magazine_mut().unwrap().start_autoplay().unwrap();
        let nav = site.on_nav_dot(4, Duration::ZERO).unwrap();
        assert!(!nav.autoplay_stopped);
        assert!(site.magazine().unwrap().is_running());
    }

    #[test]
    fn magazine_section_falls_back_to_index_four() {
        let site = Site::new(SiteConfig::default(), ids(&["a", "b", "c"]), false).unwrap();
        assert_eq!(site.magazine_section(), 4);
        assert!(site.magazine().is_none());
    }

    #[test]
    fn navigation_without_magazine_still_works() {
        let mut site = Site::new(SiteConfig::default(), ids(&["home", "team"]), false).unwrap();
        let nav = site.on_key("End", Duration::ZERO).navigation.unwrap().unwrap();
        assert_eq!(nav.transition.to, 1);
        assert!(!nav.autoplay_stopped);
    }

    #[test]
    fn non_navigation_keys_pass_through() {
        let mut site = club_site();
        let outcome = site.on_key("a", Duration::ZERO);
        assert_eq!(outcome, KeyOutcome::default());
    }

    #[test]
    fn konami_sequence_fires_once_and_navigates() {
        let mut site = club_site();
        let mut now = Duration::ZERO;
        let mut eggs = 0;
        for key in KONAMI_SEQUENCE {
            if site.on_key(key, step(&mut now, 300)).easter_egg {
                eggs += 1;
            }
        }
        assert_eq!(eggs, 1);
        assert!(!site.on_key("x", step(&mut now, 300)).easter_egg);
    }

    #[test]
    fn touch_swipe_navigates_once_per_cooldown() {
        let mut site = club_site();
        site.on_touch_start(500.0);
        assert_eq!(site.on_touch_move(470.0, Duration::ZERO), None);
        let nav = site
            .on_touch_move(420.0, Duration::from_millis(10))
            .unwrap()
            .unwrap();
        assert_eq!(nav.transition.to, 1);
        // Still moving: locked out, default not prevented.
        assert_eq!(site.on_touch_move(300.0, Duration::from_millis(20)), None);
        assert_eq!(site.navigator().current(), 1);
    }

    #[test]
    fn swipe_down_goes_back() {
        let mut site = club_site();
        site.on_nav_dot(3, Duration::ZERO).unwrap();
        site.on_touch_start(100.0);
        let nav = site
            .on_touch_move(200.0, Duration::from_secs(2))
            .unwrap()
            .unwrap();
        assert_eq!(nav.transition, Transition { from: 3, to: 2 });
    }

    #[test]
    fn anchors_resolve_by_id() {
        let mut site = club_site();
        assert_eq!(site.on_anchor("mailto:x@y.z", Duration::ZERO), None);
        assert_eq!(
            site.on_anchor("#nowhere", Duration::ZERO),
            Some(Err(Rejected::UnknownSection))
        );
        let nav = site.on_anchor("#contact", Duration::ZERO).unwrap().unwrap();
        assert_eq!(nav.transition.to, 5);
        assert_eq!(site.navigator().view().theme_color, "#2b2d42");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Site::new(
            SiteConfig::default().with_magazine_pages(0),
            ids(&["home"]),
            true,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroPages);
    }
}
