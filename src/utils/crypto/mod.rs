//! Payload signing
//!
//! HMAC-SHA256 digests carried in the `HashSHA256` header.

mod hmac;

pub use hmac::{PayloadSigner, SIGNATURE_HEADER, create_hmac_signature, verify_hmac_signature};
