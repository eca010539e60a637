//! One-shot fade-in of content cards as they scroll into view.

/// Elements that fade in.
pub const REVEAL_SELECTOR: &str = ".player-card, .sponsor-logo, .contact-card, .schedule-table";

/// Fraction of the element that must be visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Observer root margin: the bottom 10% of the viewport does not count.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -10% 0px";

/// Inline style of an element that has not been revealed yet.
pub const HIDDEN_STYLE: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "opacity 0.6s ease-out, transform 0.6s ease-out"),
];

/// Inline style applied on reveal.
pub const REVEALED_STYLE: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

/// Tracks which observed elements have been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    /// Track `count` elements, all hidden.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    /// Handle an intersection entry. Returns `true` exactly once per element:
    /// the first time it is reported as intersecting.
    pub fn on_intersect(&mut self, index: usize, is_intersecting: bool) -> bool {
        match self.revealed.get_mut(index) {
            Some(seen) if is_intersecting && !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Number of elements still hidden.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn reveals_once_and_never_hides() {
        let mut t = RevealTracker::new(3);
        assert!(!t.on_intersect(1, false));
        assert!(t.on_intersect(1, true));
        assert!(!t.on_intersect(1, true));
        assert!(!t.on_intersect(1, false));
        assert!(t.is_revealed(1));
        assert_eq!(t.pending(), 2);
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut t = RevealTracker::new(1);
        assert!(!t.on_intersect(4, true));
        assert!(!t.is_revealed(4));
        assert_eq!(t.pending(), 1);
    }
}
