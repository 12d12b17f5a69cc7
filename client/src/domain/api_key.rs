//! API key credential issued by the heroes service.
//!
//! The key is opaque: the client never inspects it beyond rejecting blank
//! values. It is held in zeroizing memory and redacted from `Debug` output so
//! log lines and panic messages cannot leak it.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Domain error returned when an API key value is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyError {
    /// Key was empty or whitespace only.
    Blank,
}

impl fmt::Display for ApiKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "api key must not be blank"),
        }
    }
}

impl std::error::Error for ApiKeyError {}

/// Opaque bearer credential attached to every resource request.
///
/// ## Invariants
/// - The value is non-empty once trimmed; surrounding whitespace is removed.
///
/// # Examples
/// ```
/// use pentathlon_client::ApiKey;
///
/// let key = ApiKey::new(" abc ").unwrap();
/// assert_eq!(key.expose(), "abc");
/// assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Validate and wrap a raw key value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiKeyError::Blank`] when `raw` is empty once trimmed.
    pub fn new(raw: &str) -> Result<Self, ApiKeyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ApiKeyError::Blank);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw key value, as sent in the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Short hex fingerprint for display without revealing the key.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(digest.get(..6).unwrap_or_default())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl TryFrom<String> for ApiKey {
    type Error = ApiKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn blank_keys_are_rejected(#[case] raw: &str) {
        let err = ApiKey::new(raw).expect_err("blank key must fail");
        assert_eq!(err, ApiKeyError::Blank);
    }

    #[rstest]
    fn debug_output_never_contains_the_key() {
        let key = ApiKey::new("super-secret").expect("valid key");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[rstest]
    fn fingerprint_is_stable_and_short() {
        let key = ApiKey::new("abc").expect("valid key");
        assert_eq!(key.fingerprint(), key.fingerprint());
        assert_eq!(key.fingerprint().len(), 12);
        assert_ne!(key.fingerprint(), ApiKey::new("xyz").expect("valid key").fingerprint());
    }
}
