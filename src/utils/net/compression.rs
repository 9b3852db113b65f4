//! Gzip helpers for request and response bodies

use crate::utils::error::Result;
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};

/// Gzip-compress `data`
pub fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a gzip stream
pub fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_header() {
        let compressed = gzip(b"{\"id\":\"PollCount\"}").unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
        assert_eq!(gunzip(&compressed).unwrap(), b"{\"id\":\"PollCount\"}");
    }

    #[test]
    fn test_gunzip_rejects_plain_text() {
        assert!(gunzip(b"not gzip").is_err());
    }
}
