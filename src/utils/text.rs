/// Collapses every run of whitespace (including `&nbsp;`) into a single space and trims the ends.
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive comparison for HTML color keywords such as `LightBlue`.
pub fn same_color(value: &str, color: &str) -> bool {
    value.trim().eq_ignore_ascii_case(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_markup_whitespace() {
        assert_eq!(clean_text("  Mon\n\t 13:15-16:00 "), "Mon 13:15-16:00");
        assert_eq!(clean_text("\u{a0}H\u{a0}110\u{a0}"), "H 110");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn colors_ignore_case() {
        assert!(same_color("lightblue", "LightBlue"));
        assert!(same_color(" White ", "White"));
        assert!(!same_color("LightBlue2", "LightBlue"));
    }
}
