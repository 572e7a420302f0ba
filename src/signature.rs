//! Signature verification for inbound webhook deliveries.
//!
//! GitHub signs each delivery by computing an HMAC-SHA256 over the raw
//! request body with the shared webhook secret and sending the result in
//! the `X-Hub-Signature-256` header as `sha256=<hex-digest>`. Verification
//! recomputes the digest over the exact bytes received and compares the
//! full header value using a constant-time equality check.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header value prefix in front of the hex digest.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies a claimed signature against the raw payload bytes.
///
/// Returns `false` when the secret is empty (the receiver is misconfigured
/// and no message may be accepted), when the claimed signature is absent or
/// malformed, or when the digests do not match. Never panics and never
/// returns early based on where the first mismatching byte occurs.
pub fn verify_signature(secret: &[u8], payload: &[u8], claimed: &str) -> bool {
    if secret.is_empty() {
        warn!("webhook secret is not configured, rejecting delivery");
        return false;
    }

    let Some(expected) = expected_signature(secret, payload) else {
        return false;
    };

    timing_safe_eq(expected.as_bytes(), claimed.as_bytes())
}

/// Computes the expected header value for a payload: `sha256=<hex>`.
///
/// Returns `None` only if HMAC construction rejects the key, which cannot
/// happen for SHA-256 (any key length is accepted).
pub fn expected_signature(secret: &[u8], payload: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload);
    let digest = hex::encode(mac.finalize().into_bytes());
    Some(format!("{SIGNATURE_PREFIX}{digest}"))
}

/// Timing-safe byte comparison to prevent signature guessing.
///
/// Examines every byte pair regardless of where the first difference
/// occurs. Inputs of different lengths compare unequal immediately, which
/// leaks only the digest length, not its content.
fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.iter().zip(b.iter()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}
