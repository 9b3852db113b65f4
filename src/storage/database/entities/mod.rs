/// Counter entity module
pub mod counter;
/// Gauge entity module
pub mod gauge;

pub use counter::Entity as Counter;
pub use gauge::Entity as Gauge;
