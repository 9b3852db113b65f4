//! Metrics agent
//!
//! Samples allocator, synthetic and host metrics into a shared
//! [`MetricSnapshot`] on two timers, and on a third timer fans the snapshot
//! out through a bounded [`DeliveryPipeline`].

pub mod alloc;
pub mod delivery;
pub mod runtime;
pub mod sampler;
pub mod snapshot;
pub mod transport;

pub use alloc::{AllocStats, CountingAllocator};
pub use delivery::{DeliveryPipeline, RoundSummary};
pub use runtime::{Agent, AgentHandle};
pub use sampler::{HostSampler, RuntimeSampler};
pub use snapshot::MetricSnapshot;
pub use transport::{Delivery, HttpTransport, Transport};
