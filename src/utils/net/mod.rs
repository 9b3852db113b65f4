//! Network utilities

pub mod compression;

pub use compression::{gunzip, gzip};
