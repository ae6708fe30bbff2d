//! Webhook signature verification
//!
//! The platform signs every webhook delivery with HMAC-SHA256 over the raw
//! request body, keyed by the channel secret, and sends the base64-encoded
//! digest in the `X-Line-Signature` header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Compute the base64 signature of `body`
///
/// Returns `None` if the secret cannot be used as an HMAC key.
pub fn sign_body(channel_secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check a received signature against `body`
///
/// The comparison runs in constant time.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-channel-secret";

    #[test]
    fn test_sign_and_verify() {
        let body = br#"{"destination":"U0","events":[]}"#;
        let signature = sign_body(SECRET, body).unwrap();

        assert!(verify_signature(SECRET, body, &signature));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let signature = sign_body(SECRET, b"{\"events\":[]}").unwrap();
        assert!(!verify_signature(SECRET, b"{\"events\":[{}]}", &signature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = b"{}";
        let signature = sign_body("other-secret", body).unwrap();
        assert!(!verify_signature(SECRET, body, &signature));
    }

    #[test]
    fn test_known_signature() {
        let signature = sign_body(SECRET, b"{\"events\":[]}");
        assert_eq!(
            signature.as_deref(),
            Some("sKRrt+MTE71nWWZPaYrvYSdH9JGlgckmBidZxDuPgPc=")
        );

        // Any key length is accepted, including an empty secret
        assert!(sign_body("", b"{}").is_some());
    }

    #[test]
    fn test_garbage_signature_rejected() {
        assert!(!verify_signature(SECRET, b"{}", "not base64!"));
        assert!(!verify_signature(SECRET, b"{}", ""));
    }
}
