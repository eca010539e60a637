//! Startup milestone timing.

use web_time::Instant;

/// Records named milestones relative to its creation.
#[derive(Debug, Clone)]
pub struct PerfMonitor {
    start: Instant,
    marks: Vec<(String, f64)>,
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: Vec::new(),
        }
    }

    /// Record a milestone and return its offset in ms.
    pub fn mark(&mut self, name: &str) -> f64 {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!("performance: {name} took {elapsed_ms:.2}ms");
        self.marks.push((name.to_string(), elapsed_ms));
        elapsed_ms
    }

    /// Offset of the most recent mark named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.marks
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, ms)| *ms)
    }

    /// All marks in recording order.
    #[must_use]
    pub fn marks(&self) -> &[(String, f64)] {
        &self.marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_are_monotonic_and_queryable() {
        let mut p = PerfMonitor::new();
        let a = p.mark("dom-ready");
        let b = p.mark("initialized");
        assert!(b >= a);
        assert_eq!(p.get("dom-ready"), Some(a));
        assert_eq!(p.get("missing"), None);
        assert_eq!(p.marks().len(), 2);
    }
}
