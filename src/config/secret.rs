//! Secret values that must never be printed verbatim.

use std::fmt;

/// A string value whose `Debug` and `Display` output is masked.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw value. Only the token request should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Mask a secret for display, keeping only its length.
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        return "<empty>".to_string();
    }
    format!("******** ({} chars)", value.chars().count())
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", mask_secret(&self.0))
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_secret(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "s3cr3t-v4lue~with.symbols";

    #[test]
    fn test_secret_display_is_masked() {
        let secret = Secret::new(RAW);
        let shown = secret.to_string();
        assert!(!shown.contains(RAW));
        assert!(!shown.contains("s3cr3t"));
        assert_eq!(shown, "******** (25 chars)");
    }

    #[test]
    fn test_secret_debug_is_masked() {
        let secret = Secret::new(RAW);
        let shown = format!("{:?}", secret);
        assert!(!shown.contains(RAW));
        assert!(shown.starts_with("Secret("));
    }

    #[test]
    fn test_expose_returns_raw_value() {
        assert_eq!(Secret::new(RAW).expose(), RAW);
    }

    #[test]
    fn test_mask_empty() {
        assert_eq!(mask_secret(""), "<empty>");
    }
}
