//! Ports module for the gap filler
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::GapFillApi;
pub use outbound::TimelineStore;
