const REDACTION: &str = "[REDACTED]";

/// Replaces every occurrence of the given secrets in `text`. Empty secrets are
/// skipped so they cannot match everywhere.
pub fn redact_secrets(text: &str, secrets: &[&str]) -> String {
    let mut out = text.to_string();
    for secret in secrets.iter().filter(|s| !s.is_empty()) {
        if out.contains(secret) {
            out = out.replace(secret, REDACTION);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::redact_secrets;

    #[test]
    fn replaces_each_secret() {
        let text = "bad key K1 with secret S1, again K1";
        assert_eq!(
            redact_secrets(text, &["K1", "S1"]),
            "bad key [REDACTED] with secret [REDACTED], again [REDACTED]"
        );
    }

    #[test]
    fn skips_empty_secrets() {
        assert_eq!(redact_secrets("abc", &["", "zz"]), "abc");
    }
}
