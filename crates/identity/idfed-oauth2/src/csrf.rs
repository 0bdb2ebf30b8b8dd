//! Anti-CSRF state for the login round-trip.
//!
//! State is issued at login start, round-tripped through the provider, and
//! checked once at the callback. Storage between the two ends belongs to the
//! caller (typically a short-lived cookie), and the stored value must be
//! discarded after one validation attempt.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, thread_rng};

const STATE_BYTES: usize = 32;

/// Produce a fresh, URL-safe, unpredictable state token. This is a
/// security-critical control: the randomness source is a CSPRNG.
pub fn generate_state() -> String {
    let mut rng = thread_rng();
    let bytes: Vec<u8> = (0..STATE_BYTES).map(|_| rng.r#gen::<u8>()).collect();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Byte-for-byte comparison of the state echoed by the provider against the
/// one the caller stored. No trimming, no case folding; an empty value never
/// validates.
pub fn validate_state(received: &str, stored: &str) -> bool {
    !received.is_empty() && received == stored
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn state_is_never_empty() {
        assert!(!generate_state().is_empty());
    }

    #[test]
    fn state_is_url_safe() {
        let state = generate_state();
        assert!(
            state
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn states_are_unique_across_many_samples() {
        let states: HashSet<String> = (0..10_000).map(|_| generate_state()).collect();
        assert_eq!(states.len(), 10_000);
    }

    #[test]
    fn validate_requires_exact_match() {
        assert!(validate_state("abc123", "abc123"));
        assert!(!validate_state("abc123", "abc124"));
        assert!(!validate_state("ABC123", "abc123"));
        assert!(!validate_state("abc123 ", "abc123"));
    }

    #[test]
    fn empty_state_never_validates() {
        assert!(!validate_state("", ""));
        assert!(!validate_state("", "stored"));
    }
}
