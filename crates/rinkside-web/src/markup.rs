//! Selectors, class names and inline-style values shared with the page markup.

pub const SECTION_SELECTOR: &str = ".fullpage-section";
pub const NAV_DOT_SELECTOR: &str = ".nav-dot";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const PARTICLE_SELECTOR: &str = ".particle";
pub const THEME_META_SELECTOR: &str = "meta[name=\"theme-color\"]";

pub const LOADING_OVERLAY_ID: &str = "loadingOverlay";
pub const PARTICLES_ID: &str = "particles";
pub const MAGAZINE_PAGES_ID: &str = "magazinePages";
pub const MAGAZINE_INDICATORS_ID: &str = "magazineIndicators";
pub const CURRENT_PAGE_ID: &str = "currentPage";
pub const TOTAL_PAGES_ID: &str = "totalPages";
pub const PREV_BUTTON_ID: &str = "prevBtn";
pub const NEXT_BUTTON_ID: &str = "nextBtn";
pub const AUTOPLAY_BUTTON_ID: &str = "autoPlayBtn";
pub const AUTOPLAY_PROGRESS_ID: &str = "autoProgress";

pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";
pub const PARTICLE_CLASS: &str = "particle";
pub const MAGAZINE_DOT_CLASS: &str = "magazine-dot";

/// Data attribute linking an observed element to its reveal slot.
pub const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

/// `will-change` value while a section is preloaded.
pub const PRELOAD_WILL_CHANGE: &str = "opacity, transform";

const AUTOPLAY_START_LABEL: &str = r#"<i class="fas fa-play"></i> Auto-Scroll starten"#;
const AUTOPLAY_STOP_LABEL: &str = r#"<i class="fas fa-pause"></i> Auto-Scroll stoppen"#;

/// Autoplay button content.
#[must_use]
pub const fn autoplay_label(running: bool) -> &'static str {
    if running {
        AUTOPLAY_STOP_LABEL
    } else {
        AUTOPLAY_START_LABEL
    }
}

/// CSS percentage, e.g. the progress bar width.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value}%")
}

/// Body `animation` for the easter egg.
#[must_use]
pub fn easter_egg_animation(duration_ms: u64) -> String {
    format!("hue-rotate {}s ease-in-out", duration_ms as f64 / 1000.0)
}

/// Milliseconds as a browser timer delay.
#[must_use]
pub fn timer_ms(ms: u64) -> u32 {
    u32::try_from(ms).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn autoplay_labels_swap() {
        assert!(autoplay_label(true).contains("fa-pause"));
        assert!(autoplay_label(false).contains("starten"));
    }

    #[test]
    fn style_values() {
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(51.25), "51.25%");
        assert_eq!(easter_egg_animation(3000), "hue-rotate 3s ease-in-out");
        assert_eq!(easter_egg_animation(1500), "hue-rotate 1.5s ease-in-out");
    }

    #[test]
    fn timer_delays_saturate() {
        assert_eq!(timer_ms(50), 50);
        assert_eq!(timer_ms(u64::MAX), u32::MAX);
    }
}
