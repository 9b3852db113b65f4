//! Services module
//!
//! This module contains the server's durability service

pub mod durability;

pub use durability::{
    AsyncController, Durability, DurabilityController, SyncController, load_into,
};
