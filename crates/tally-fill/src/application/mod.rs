//! Application layer: the propagator and its run bookkeeping.

pub mod cancel;
pub mod report;
pub mod service;

#[cfg(test)]
mod properties;
