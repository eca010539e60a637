//! Gesture normalization: DOM wheel/key/touch input → [`NavIntent`].
//!
//! Nothing here knows about the cooldown; the navigator swallows intents that
//! arrive while it is cooling.

use core::time::Duration;

/// A request to change the visible section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavIntent {
    Next,
    Previous,
    First,
    Last,
    /// Absolute index (nav dot click).
    To(usize),
    /// Section id from an in-page `#anchor` link.
    Anchor(String),
}

impl NavIntent {
    /// Relative step for a signed vertical delta: positive scrolls down.
    #[must_use]
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 { Self::Next } else { Self::Previous }
    }

    /// Intent for an in-page link such as `#team`. Links without a fragment
    /// id resolve to nothing.
    #[must_use]
    pub fn from_href(href: &str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        (!id.is_empty()).then(|| Self::Anchor(id.to_string()))
    }
}

/// Map a DOM `KeyboardEvent.key` to a navigation intent.
///
/// Keys that map to an intent should have their default action prevented.
#[must_use]
pub fn key_intent(key: &str) -> Option<NavIntent> {
    match key {
        "ArrowDown" | "Space" | " " | "Spacebar" => Some(NavIntent::Next),
        "ArrowUp" => Some(NavIntent::Previous),
        "Home" => Some(NavIntent::First),
        "End" => Some(NavIntent::Last),
        _ => None,
    }
}

/// Trailing-edge wheel debouncer: only the last event of a burst counts.
#[derive(Debug, Clone)]
pub struct WheelDebouncer {
    quiet: Duration,
    min_delta: f64,
    pending: Option<PendingWheel>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingWheel {
    delta_y: f64,
    at: Duration,
}

impl WheelDebouncer {
    #[must_use]
    pub fn new(quiet: Duration, min_delta: f64) -> Self {
        Self {
            quiet,
            min_delta,
            pending: None,
        }
    }

    /// Record a wheel event, replacing any pending one.
    ///
    /// Returns the time at which the host should call [`fire`](Self::fire).
    pub fn push(&mut self, delta_y: f64, now: Duration) -> Duration {
        self.pending = Some(PendingWheel { delta_y, at: now });
        now.saturating_add(self.quiet)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending event, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.map(|p| p.at.saturating_add(self.quiet))
    }

    /// Evaluate the pending event once its quiet period has elapsed.
    ///
    /// Consumes the pending event. Small deltas resolve to `None`.
    pub fn fire(&mut self, now: Duration) -> Option<NavIntent> {
        let pending = self.pending?;
        if now < pending.at.saturating_add(self.quiet) {
            return None;
        }
        self.pending = None;
        (pending.delta_y.abs() > self.min_delta).then(|| NavIntent::from_delta(pending.delta_y))
    }
}

/// Vertical swipe detector.
///
/// The start point is kept for the whole touch; once a swipe is recognized,
/// further moves keep producing the same intent and the navigator cooldown
/// swallows them.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    min_delta: f64,
    start_y: Option<f64>,
}

impl SwipeTracker {
    #[must_use]
    pub fn new(min_delta: f64) -> Self {
        Self {
            min_delta,
            start_y: None,
        }
    }

    /// `touchstart`: remember the first touch point.
    pub fn start(&mut self, y: f64) {
        self.start_y = Some(y);
    }

    /// `touchmove`: intent once the finger traveled more than the threshold.
    ///
    /// Moving the finger up (content scrolls down) is `Next`.
    #[must_use]
    pub fn moved(&self, y: f64) -> Option<NavIntent> {
        let delta = self.start_y? - y;
        (delta.abs() > self.min_delta).then(|| NavIntent::from_delta(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn keys_map_to_intents() {
        assert_eq!(key_intent("ArrowDown"), Some(NavIntent::Next));
        assert_eq!(key_intent(" "), Some(NavIntent::Next));
        assert_eq!(key_intent("Space"), Some(NavIntent::Next));
        assert_eq!(key_intent("ArrowUp"), Some(NavIntent::Previous));
        assert_eq!(key_intent("Home"), Some(NavIntent::First));
        assert_eq!(key_intent("End"), Some(NavIntent::Last));
        assert_eq!(key_intent("ArrowLeft"), None);
        assert_eq!(key_intent("PageDown"), None);
    }

    #[test]
    fn href_fragments() {
        assert_eq!(
            NavIntent::from_href("#team"),
            Some(NavIntent::Anchor("team".into()))
        );
        assert_eq!(NavIntent::from_href("#"), None);
        assert_eq!(NavIntent::from_href("https://example.org"), None);
    }

    #[test]
    fn wheel_fires_after_quiet_period() {
        let mut w = WheelDebouncer::new(ms(100), 10.0);
        assert_eq!(w.push(50.0, ms(0)), ms(100));
        assert_eq!(w.fire(ms(99)), None);
        assert!(w.has_pending());
        assert_eq!(w.fire(ms(100)), Some(NavIntent::Next));
        assert!(!w.has_pending());
        assert_eq!(w.fire(ms(200)), None);
    }

    #[test]
    fn wheel_burst_uses_last_event() {
        let mut w = WheelDebouncer::new(ms(100), 10.0);
        w.push(80.0, ms(0));
        w.push(60.0, ms(40));
        assert_eq!(w.push(-30.0, ms(80)), ms(180));
        assert_eq!(w.deadline(), Some(ms(180)));
        assert_eq!(w.fire(ms(150)), None);
        assert_eq!(w.fire(ms(180)), Some(NavIntent::Previous));
    }

    #[test]
    fn small_wheel_deltas_are_ignored() {
        let mut w = WheelDebouncer::new(ms(100), 10.0);
        w.push(10.0, ms(0));
        assert_eq!(w.fire(ms(100)), None);
        assert!(!w.has_pending());
        w.push(-10.5, ms(200));
        assert_eq!(w.fire(ms(300)), Some(NavIntent::Previous));
    }

    #[test]
    fn swipe_needs_threshold() {
        let mut s = SwipeTracker::new(50.0);
        assert_eq!(s.moved(10.0), None);
        s.start(400.0);
        assert_eq!(s.moved(360.0), None);
        assert_eq!(s.moved(350.0), None);
        assert_eq!(s.moved(349.0), Some(NavIntent::Next));
        assert_eq!(s.moved(451.0), Some(NavIntent::Previous));
    }
}
