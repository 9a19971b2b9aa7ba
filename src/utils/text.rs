/// Keeps at most `max_chars` characters. Counts characters, not bytes, so a
/// multi-byte sequence is never split.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => value[..end].to_string(),
        None => value.to_string(),
    }
}

/// Treats empty and whitespace-only strings as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{non_blank, truncate_chars};

    #[test]
    fn truncate_chars_handles_ascii() {
        assert_eq!(truncate_chars("server error", 6), "server");
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("aéb", 2), "aé");
        assert_eq!(truncate_chars("😀😀😀", 1), "😀");
    }

    #[test]
    fn non_blank_drops_whitespace() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" sol ")), Some("sol"));
    }
}
