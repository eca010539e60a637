//! Full-page section navigation.
//!
//! [`SectionNavigator`] tracks which of `N` stacked sections is visible and
//! enforces a cooldown after every transition so that a single physical
//! gesture (a long trackpad swipe, a held key) moves at most one section.
//!
//! # Invariants
//!
//! - Exactly one section is current; out-of-range requests never move it.
//! - After a successful transition at time `t`, every request before
//!   `t + cooldown` is rejected.
//! - No wraparound: stepping past either end is rejected.

use core::fmt;
use core::time::Duration;

use crate::gesture::NavIntent;
use crate::theme::theme_color;

/// Gesture lockout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cooldown {
    /// Accepting transitions.
    #[default]
    Idle,
    /// Rejecting transitions until the deadline.
    Cooling { until: Duration },
}

/// A successful section change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Why a navigation request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// Target is below 0 or at/above the section count.
    OutOfRange { len: usize },
    /// Target is already the current section.
    AlreadyCurrent,
    /// A previous transition is still cooling down.
    Cooling { remaining: Duration },
    /// The anchor target is not one of the sections.
    UnknownSection,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { len } => write!(f, "target outside 0..{len}"),
            Self::AlreadyCurrent => write!(f, "already on target section"),
            Self::Cooling { remaining } => {
                write!(f, "cooling down for {}ms", remaining.as_millis())
            }
            Self::UnknownSection => write!(f, "no section with that id"),
        }
    }
}

/// Projection of navigator state onto the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    /// Index of the section (and nav dot) carrying the `active` class.
    pub active: usize,
    /// Value for `<meta name="theme-color">`.
    pub theme_color: &'static str,
}

impl SectionView {
    /// Whether section/dot `index` should carry the `active` class.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == index
    }
}

/// Section navigator with cooldown.
#[derive(Debug, Clone)]
pub struct SectionNavigator {
    ids: Vec<String>,
    current: usize,
    cooldown: Cooldown,
    cooldown_len: Duration,
}

impl SectionNavigator {
    /// Create a navigator over sections with the given ids, starting at 0.
    #[must_use]
    pub fn new(ids: Vec<String>, cooldown_len: Duration) -> Self {
        Self {
            ids,
            current: 0,
            cooldown: Cooldown::Idle,
            cooldown_len,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.ids.get(self.current).map(String::as_str)
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Index of the section with `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }

    #[must_use]
    pub const fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    /// Move `Cooling` back to `Idle` once its deadline has passed.
    pub fn tick(&mut self, now: Duration) {
        if let Cooldown::Cooling { until } = self.cooldown
            && now >= until
        {
            self.cooldown = Cooldown::Idle;
        }
    }

    /// Whether gestures are currently locked out.
    #[must_use]
    pub fn is_cooling(&self, now: Duration) -> bool {
        matches!(self.cooldown, Cooldown::Cooling { until } if now < until)
    }

    /// Resolve an intent to an absolute target, if it has one.
    ///
    /// Returns `None` when a relative step would leave the section range.
    #[must_use]
    pub fn resolve(&self, intent: &NavIntent) -> Option<usize> {
        match intent {
            NavIntent::Next => self.current.checked_add(1),
            NavIntent::Previous => self.current.checked_sub(1),
            NavIntent::First => Some(0),
            NavIntent::Last => self.ids.len().checked_sub(1),
            NavIntent::To(index) => Some(*index),
            NavIntent::Anchor(id) => self.index_of(id),
        }
    }

    /// Transition to `index` if it is in range, not current, and not cooling.
    pub fn go_to(&mut self, index: usize, now: Duration) -> Result<Transition, Rejected> {
        self.tick(now);

        if let Cooldown::Cooling { until } = self.cooldown {
            return Err(Rejected::Cooling {
                remaining: until.saturating_sub(now),
            });
        }
        if index >= self.ids.len() {
            return Err(Rejected::OutOfRange {
                len: self.ids.len(),
            });
        }
        if index == self.current {
            return Err(Rejected::AlreadyCurrent);
        }

        let from = self.current;
        self.current = index;
        self.cooldown = Cooldown::Cooling {
            until: now.saturating_add(self.cooldown_len),
        };
        Ok(Transition { from, to: index })
    }

    /// Resolve and apply an intent.
    pub fn navigate(&mut self, intent: &NavIntent, now: Duration) -> Result<Transition, Rejected> {
        match self.resolve(intent) {
            Some(index) => self.go_to(index, now),
            None if matches!(intent, NavIntent::Anchor(_)) => Err(Rejected::UnknownSection),
            None => {
                // Still report cooling first so logs explain the swallowed gesture.
                self.tick(now);
                match self.cooldown {
                    Cooldown::Cooling { until } => Err(Rejected::Cooling {
                        remaining: until.saturating_sub(now),
                    }),
                    Cooldown::Idle => Err(Rejected::OutOfRange {
                        len: self.ids.len(),
                    }),
                }
            }
        }
    }

    /// Sections adjacent to the current one that exist.
    #[must_use]
    pub fn adjacent(&self) -> Vec<usize> {
        [self.current.checked_add(1), self.current.checked_sub(1)]
            .into_iter()
            .flatten()
            .filter(|&i| i < self.ids.len())
            .collect()
    }

    /// Current view projection.
    #[must_use]
    pub fn view(&self) -> SectionView {
        SectionView {
            active: self.current,
            theme_color: theme_color(self.current_id().unwrap_or_default()),
        }
    }
}
