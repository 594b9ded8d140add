//! Ed25519 Request Verification
//!
//! Verifies the platform's detached signature over `timestamp ‖ body`
//! against the application's configured public key. The key is parsed
//! once at startup; a bad key is a startup failure, not a request-time
//! one.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

/// Errors parsing the configured public key.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("public key is not valid hex")]
    InvalidHex,
    #[error("public key must be {0} bytes")]
    WrongLength(usize),
    #[error("public key is not a valid Ed25519 point")]
    InvalidKey,
}

/// Holds the parsed verifying key for inbound interaction requests.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Parse a hex-encoded Ed25519 public key.
    pub fn from_hex(public_key_hex: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(public_key_hex).map_err(|_| KeyError::InvalidHex)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| KeyError::WrongLength(32))?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidKey)?;
        Ok(Self { key })
    }

    /// Verify a hex signature over `timestamp ‖ body`.
    ///
    /// Any malformed input verifies as false; this never panics or errors.
    #[must_use]
    pub fn verify(&self, timestamp: &str, body: &[u8], signature_hex: &str) -> bool {
        let Ok(sig_bytes) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(sig_bytes) else {
            return false;
        };
        let signature = Signature::from_bytes(&sig_bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify(&message, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    fn keypair() -> (SigningKey, SignatureVerifier) {
        let signing = SigningKey::generate(&mut OsRng);
        let verifier =
            SignatureVerifier::from_hex(&hex::encode(signing.verifying_key().to_bytes())).unwrap();
        (signing, verifier)
    }

    #[test]
    fn sign_and_verify() {
        let (signing, verifier) = keypair();
        let timestamp = "1700000000";
        let body = br#"{"type":1}"#;

        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        let signature = hex::encode(signing.sign(&message).to_bytes());

        assert!(verifier.verify(timestamp, body, &signature));
        assert!(!verifier.verify("1700000001", body, &signature));
        assert!(!verifier.verify(timestamp, br#"{"type":2}"#, &signature));
    }

    #[test]
    fn malformed_signature_is_false_not_a_panic() {
        let (_, verifier) = keypair();
        assert!(!verifier.verify("0", b"x", "not-hex"));
        assert!(!verifier.verify("0", b"x", "abcd"));
    }

    #[test]
    fn bad_keys_fail_at_parse() {
        assert!(matches!(
            SignatureVerifier::from_hex("zz"),
            Err(KeyError::InvalidHex)
        ));
        assert!(matches!(
            SignatureVerifier::from_hex("abcd"),
            Err(KeyError::WrongLength(32))
        ));
    }
}
