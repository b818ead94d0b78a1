//! Outbound Ports (Driven Ports / SPI)
//!
//! What the propagator needs from storage.

use crate::domain::entities::{Record, Slot};
use crate::domain::errors::StoreError;
use crate::domain::value_objects::Index;

/// Timeline storage.
///
/// Must be read-after-write consistent: a `get` observes every earlier `set`
/// made through the same handle.
pub trait TimelineStore {
    /// Look up the record at `index`.
    ///
    /// A missing record is not an error. Indices below zero read as
    /// [`Slot::before_start`], indices past the populated range as
    /// [`Slot::past_end`]; everything else is returned verbatim.
    fn get(&self, index: Index) -> Result<Slot, StoreError>;

    /// Insert or replace the full record at `index`.
    fn set(&mut self, index: Index, record: Record) -> Result<(), StoreError>;
}

impl<T: TimelineStore + ?Sized> TimelineStore for &mut T {
    fn get(&self, index: Index) -> Result<Slot, StoreError> {
        (**self).get(index)
    }

    fn set(&mut self, index: Index, record: Record) -> Result<(), StoreError> {
        (**self).set(index, record)
    }
}

impl<T: TimelineStore + ?Sized> TimelineStore for Box<T> {
    fn get(&self, index: Index) -> Result<Slot, StoreError> {
        (**self).get(index)
    }

    fn set(&mut self, index: Index, record: Record) -> Result<(), StoreError> {
        (**self).set(index, record)
    }
}
