//! Section id → browser `theme-color` lookup.

/// Color used for sections without an entry.
pub const DEFAULT_THEME_COLOR: &str = "#f1faee";

/// Browser chrome color for the section with the given id.
#[must_use]
pub fn theme_color(section_id: &str) -> &'static str {
    match section_id {
        "home" => "#d90429",
        "team" | "magazine" => "#219ebc",
        "contact" => "#2b2d42",
        _ => DEFAULT_THEME_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn known_sections_have_colors() {
        assert_eq!(theme_color("home"), "#d90429");
        assert_eq!(theme_color("team"), "#219ebc");
        assert_eq!(theme_color("magazine"), "#219ebc");
        assert_eq!(theme_color("contact"), "#2b2d42");
    }

    #[test]
    fn unknown_sections_fall_back() {
        assert_eq!(theme_color("sponsors"), DEFAULT_THEME_COLOR);
        assert_eq!(theme_color(""), DEFAULT_THEME_COLOR);
        assert_eq!(theme_color("Home"), DEFAULT_THEME_COLOR);
    }
}
