//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait implemented by every configuration struct
//! - `tests`: validator test suite

mod tests;
mod trait_def;

pub use trait_def::Validate;
