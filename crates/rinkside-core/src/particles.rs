//! Decorative particle field.
//!
//! Particles are write-once: their parameters are drawn at startup and the
//! motion itself is a CSS keyframe animation. The only runtime control is
//! pausing every particle while the document is hidden.

use rand::Rng;

/// Visual parameters of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDescriptor {
    /// Horizontal position, percent of the container width, in `[0, 100)`.
    pub left_percent: f64,
    /// Width and height in px, in `[2, 8)`.
    pub size_px: f64,
    /// Animation delay in seconds, in `[0, 20)`.
    pub delay_s: f64,
    /// Animation duration in seconds, in `[15, 25)`.
    pub duration_s: f64,
}

impl ParticleDescriptor {
    /// Draw one particle.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left_percent: rng.random::<f64>() * 100.0,
            size_px: rng.random::<f64>() * 6.0 + 2.0,
            delay_s: rng.random::<f64>() * 20.0,
            duration_s: rng.random::<f64>() * 10.0 + 15.0,
        }
    }

    /// Inline style properties as `(property, value)` pairs.
    #[must_use]
    pub fn style(&self) -> [(&'static str, String); 5] {
        let size = format!("{}px", self.size_px);
        [
            ("left", format!("{}%", self.left_percent)),
            ("width", size.clone()),
            ("height", size),
            ("animation-delay", format!("{}s", self.delay_s)),
            ("animation-duration", format!("{}s", self.duration_s)),
        ]
    }
}

/// Draw `count` independent particles.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<ParticleDescriptor> {
    (0..count).map(|_| ParticleDescriptor::random(rng)).collect()
}

/// CSS `animation-play-state` for the particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

impl PlayState {
    /// Play state for the given `document.hidden` value.
    #[must_use]
    pub const fn for_hidden(hidden: bool) -> Self {
        if hidden { Self::Paused } else { Self::Running }
    }

    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}
