//! Masking of secret material in user-facing output.

/// Keep the first character (the StrKey version letter) and mask the rest,
/// so a secret seed can be mentioned without being disclosed.
pub fn redact_secret(secret: &str) -> String {
    match secret.chars().next() {
        Some(first) => format!("{first}{}", "*".repeat(7)),
        None => String::new(),
    }
}
