//! Magazine paginator with autoplay.
//!
//! The magazine is a horizontal strip of `P` pages. [`MagazinePaginator`]
//! owns the current page and the autoplay sub-machine:
//!
//! ```text
//!            start (new token)
//!   Stopped ───────────────────▶ Running { elapsed_in_cycle }
//!      ▲                            │  tick: +tick_ms, turn page at cycle end
//!      └────────────────────────────┘
//!            stop (token invalidated)
//! ```
//!
//! The host runs a periodic timer for each token it receives from
//! [`start_autoplay`](MagazinePaginator::start_autoplay) and feeds that token
//! back into [`tick`](MagazinePaginator::tick). Ticks carrying a stale token
//! are ignored, so a timer callback racing a stop cannot turn a page.

/// Identifies one autoplay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoplayToken(u64);

/// Autoplay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Autoplay {
    #[default]
    Stopped,
    Running {
        token: AutoplayToken,
        /// Time since the last page turn (or start), always `< cycle_ms`.
        elapsed_in_cycle: u64,
    },
}

/// Result of one autoplay tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayTick {
    /// Progress bar width in percent.
    pub progress_percent: f64,
    /// Page turned to on this tick, if any.
    pub turned_to: Option<usize>,
}

/// Result of the autoplay toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Started(AutoplayToken),
    Stopped,
}

/// Projection of the page strip and its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagazineView {
    pub page: usize,
    pub page_count: usize,
    /// Horizontal strip offset in percent (`-page * 100`).
    pub offset_percent: i64,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl MagazineView {
    /// CSS `transform` value for the page strip.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translateX({}%)", self.offset_percent)
    }

    /// One-based page label.
    #[must_use]
    pub fn page_label(&self) -> String {
        (self.page + 1).to_string()
    }

    /// Whether indicator `index` is highlighted.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.page == index
    }
}

/// Projection of the autoplay button and progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayView {
    pub running: bool,
    pub progress_percent: f64,
}

/// Paginated magazine state.
#[derive(Debug, Clone)]
pub struct MagazinePaginator {
    page_count: usize,
    current: usize,
    autoplay: Autoplay,
    next_token: u64,
    cycle_ms: u64,
    tick_ms: u64,
}

impl MagazinePaginator {
    /// Create a paginator on page 0 with autoplay stopped.
    ///
    /// `cycle_ms` must be a positive multiple of `tick_ms`; see
    /// [`SiteConfig::validate`](crate::SiteConfig::validate).
    #[must_use]
    pub fn new(page_count: usize, cycle_ms: u64, tick_ms: u64) -> Self {
        Self {
            page_count,
            current: 0,
            autoplay: Autoplay::Stopped,
            next_token: 0,
            cycle_ms,
            tick_ms,
        }
    }

    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.autoplay, Autoplay::Running { .. })
    }

    #[must_use]
    pub const fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Show page `index`. Out-of-range indices are ignored.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        if index >= self.page_count {
            return false;
        }
        self.current = index;
        true
    }

    /// Manual "previous": stops autoplay, then turns back one page.
    ///
    /// Returns whether autoplay was stopped.
    pub fn previous(&mut self) -> bool {
        let stopped = self.stop_autoplay();
        if let Some(index) = self.current.checked_sub(1) {
            self.go_to_page(index);
        }
        stopped
    }

    /// Manual "next": stops autoplay, then turns forward one page.
    ///
    /// Returns whether autoplay was stopped.
    pub fn next(&mut self) -> bool {
        let stopped = self.stop_autoplay();
        self.go_to_page(self.current + 1);
        stopped
    }

    /// Start autoplay. Returns the token for the new run, or `None` when a
    /// run is already active.
    pub fn start_autoplay(&mut self) -> Option<AutoplayToken> {
        if self.is_running() {
            return None;
        }
        let token = AutoplayToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.autoplay = Autoplay::Running {
            token,
            elapsed_in_cycle: 0,
        };
        tracing::debug!(page = self.current, "magazine autoplay started");
        Some(token)
    }

    /// Stop autoplay. Returns `true` if a run was active.
    pub fn stop_autoplay(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.autoplay = Autoplay::Stopped;
        tracing::debug!(page = self.current, "magazine autoplay stopped");
        true
    }

    /// Autoplay toggle button.
    pub fn toggle_autoplay(&mut self) -> Toggled {
        if self.stop_autoplay() {
            Toggled::Stopped
        } else {
            // Not running, so start always yields a token.
            match self.start_autoplay() {
                Some(token) => Toggled::Started(token),
                None => Toggled::Stopped,
            }
        }
    }

    /// Whether `token` belongs to the active run.
    #[must_use]
    pub fn is_current(&self, token: AutoplayToken) -> bool {
        matches!(self.autoplay, Autoplay::Running { token: t, .. } if t == token)
    }

    /// Advance the active run by one tick.
    ///
    /// Returns `None` for stale tokens.
    pub fn tick(&mut self, token: AutoplayToken) -> Option<AutoplayTick> {
        let Autoplay::Running {
            token: active,
            elapsed_in_cycle,
        } = self.autoplay
        else {
            return None;
        };
        if active != token {
            return None;
        }

        let mut elapsed = elapsed_in_cycle + self.tick_ms;
        let mut turned_to = None;
        if elapsed >= self.cycle_ms {
            elapsed = 0;
            if let Some(next) = (self.current + 1).checked_rem(self.page_count) {
                self.go_to_page(next);
                turned_to = Some(next);
                tracing::trace!(page = next, "autoplay page turn");
            }
        }
        self.autoplay = Autoplay::Running {
            token,
            elapsed_in_cycle: elapsed,
        };

        Some(AutoplayTick {
            progress_percent: self.progress_percent(),
            turned_to,
        })
    }

    fn progress_percent(&self) -> f64 {
        match self.autoplay {
            Autoplay::Running {
                elapsed_in_cycle, ..
            } => (elapsed_in_cycle * 100) as f64 / self.cycle_ms as f64,
            Autoplay::Stopped => 0.0,
        }
    }

    #[must_use]
    pub fn view(&self) -> MagazineView {
        MagazineView {
            page: self.current,
            page_count: self.page_count,
            offset_percent: -(self.current as i64) * 100,
            prev_disabled: self.current == 0,
            next_disabled: self.current + 1 == self.page_count,
        }
    }

    #[must_use]
    pub fn autoplay_view(&self) -> AutoplayView {
        AutoplayView {
            running: self.is_running(),
            progress_percent: self.progress_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn magazine() -> MagazinePaginator {
        MagazinePaginator::new(7, 4000, 50)
    }

    fn run_ticks(m: &mut MagazinePaginator, token: AutoplayToken, n: usize) -> Vec<usize> {
        (0..n)
            .filter_map(|_| m.tick(token).and_then(|t| t.turned_to))
            .collect()
    }

    #[test]
    fn every_page_projects_offset_and_controls() {
        let mut m = magazine();
        for i in 0..7 {
            assert!(m.go_to_page(i));
            let v = m.view();
            assert_eq!(v.offset_percent, -(i as i64) * 100);
            assert_eq!(v.prev_disabled, i == 0);
            assert_eq!(v.next_disabled, i == 6);
            assert_eq!(v.page_label(), (i + 1).to_string());
        }
    }

    #[test]
    fn out_of_range_page_is_ignored() {
        let mut m = magazine();
        m.go_to_page(2);
        assert!(!m.go_to_page(7));
        assert_eq!(m.current(), 2);
    }

    #[test]
    fn next_from_page_three() {
        let mut m = magazine();
        m.go_to_page(3);
        m.next();
        let v = m.view();
        assert_eq!(v.page, 4);
        assert_eq!(v.transform(), "translateX(-400%)");
        assert!(!v.prev_disabled);
        assert!(!v.next_disabled);
    }

    #[test]
    fn manual_turns_stop_at_edges() {
        let mut m = magazine();
        m.previous();
        assert_eq!(m.current(), 0);
        m.go_to_page(6);
        m.next();
        assert_eq!(m.current(), 6);
    }

    #[test]
    fn autoplay_turns_once_per_cycle_and_wraps() {
        let mut m = magazine();
        m.go_to_page(5);
        let token = m.start_autoplay().unwrap();

        // 79 ticks = 3950ms: no turn yet.
        assert_eq!(run_ticks(&mut m, token, 79), Vec::<usize>::new());
        let tick = m.tick(token).unwrap();
        assert_eq!(tick.turned_to, Some(6));
        assert_eq!(tick.progress_percent, 0.0);

        assert_eq!(run_ticks(&mut m, token, 80), vec![0]);
        assert_eq!(run_ticks(&mut m, token, 160), vec![1, 2]);
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut m = magazine();
        let token = m.start_autoplay().unwrap();
        run_ticks(&mut m, token, 40);
        assert_eq!(m.autoplay_view().progress_percent, 50.0);
        let tick = m.tick(token).unwrap();
        assert_eq!(tick.progress_percent, 51.25);
    }

    #[test]
    fn stop_resets_progress_and_keeps_page() {
        let mut m = magazine();
        let token = m.start_autoplay().unwrap();
        run_ticks(&mut m, token, 100);
        assert_eq!(m.current(), 1);
        assert!(m.stop_autoplay());
        assert_eq!(
            m.autoplay_view(),
            AutoplayView {
                running: false,
                progress_percent: 0.0
            }
        );
        assert_eq!(m.current(), 1);
        assert!(!m.stop_autoplay());
    }

    #[test]
    fn stale_tokens_are_ignored() {
        let mut m = magazine();
        let first = m.start_autoplay().unwrap();
        m.stop_autoplay();
        assert_eq!(m.tick(first), None);
        let second = m.start_autoplay().unwrap();
        assert_ne!(first, second);
        assert!(m.is_current(second));
        assert_eq!(m.tick(first), None);
        assert!(m.tick(second).is_some());
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let mut m = magazine();
        assert!(m.start_autoplay().is_some());
        assert_eq!(m.start_autoplay(), None);
    }

    #[test]
    fn toggle_alternates() {
        let mut m = magazine();
        assert!(matches!(m.toggle_autoplay(), Toggled::Started(_)));
        assert!(m.is_running());
        assert_eq!(m.toggle_autoplay(), Toggled::Stopped);
        assert!(!m.is_running());
    }

    #[test]
    fn manual_navigation_stops_autoplay_then_turns_one_page() {
        let mut m = magazine();
        m.go_to_page(2);
        let token = m.start_autoplay().unwrap();
        assert!(m.next());
        assert_eq!(m.current(), 3);
        assert!(!m.is_running());
        assert_eq!(m.tick(token), None);
        assert!(!m.previous());
        assert_eq!(m.current(), 2);
    }

    #[test]
    fn indicator_jump_keeps_autoplay_running() {
        let mut m = magazine();
        let token = m.start_autoplay().unwrap();
        m.go_to_page(4);
        assert!(m.is_current(token));
        assert_eq!(run_ticks(&mut m, token, 80), vec![5]);
    }
}
