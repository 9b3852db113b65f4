//! HMAC signature creation and verification

use crate::utils::error::{Result, TelemetryError};
use hmac::{Hmac, Mac, digest::KeyInit as HmacKeyInit};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex digest of the uncompressed body
pub const SIGNATURE_HEADER: &str = "HashSHA256";

/// Create a hex HMAC-SHA256 signature of `data`
pub fn create_hmac_signature(secret: &[u8], data: &[u8]) -> Result<String> {
    let mut mac = <HmacSha256 as HmacKeyInit>::new_from_slice(secret)
        .map_err(|e| TelemetryError::crypto(format!("Invalid HMAC key: {}", e)))?;

    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a hex HMAC-SHA256 signature of `data`
pub fn verify_hmac_signature(secret: &[u8], data: &[u8], signature: &str) -> Result<bool> {
    let expected = create_hmac_signature(secret, data)?;
    Ok(constant_time_eq(&expected, &signature.to_ascii_lowercase()))
}

/// Constant-time string comparison
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}

/// Signs outgoing payloads and checks incoming ones against a shared key.
///
/// Without a key both operations are no-ops: nothing is signed and every
/// payload passes verification.
#[derive(Debug, Clone, Default)]
pub struct PayloadSigner {
    key: Option<Vec<u8>>,
}

impl PayloadSigner {
    pub fn new(key: Option<&str>) -> Self {
        Self {
            key: key.filter(|k| !k.is_empty()).map(|k| k.as_bytes().to_vec()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Signature for `data`, or `None` when no key is configured.
    pub fn sign(&self, data: &[u8]) -> Result<Option<String>> {
        match &self.key {
            Some(key) => create_hmac_signature(key, data).map(Some),
            None => Ok(None),
        }
    }

    /// Check `signature` against `data`.
    ///
    /// A request without a signature header is accepted; a present header
    /// that does not match is a [`TelemetryError::Signature`].
    pub fn verify(&self, data: &[u8], signature: Option<&str>) -> Result<()> {
        let (Some(key), Some(signature)) = (&self.key, signature) else {
            return Ok(());
        };

        if verify_hmac_signature(key, data, signature)? {
            Ok(())
        } else {
            Err(TelemetryError::signature("payload digest does not match"))
        }
    }
}
