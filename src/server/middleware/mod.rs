//! HTTP middleware implementations
//!
//! - Compression gating for response content types that should not be gzipped

mod compression;


pub use compression::{CompressionGate, CompressionGateService, is_compressible};
