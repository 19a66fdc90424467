//! `ShiftAssignment` — the unit the genetic algorithm evolves.

use std::fmt;
use std::ops::{Index, IndexMut};

use sg_core::BusId;

use crate::Driver;

/// One driver per bus slot, in slot order.  Driver `i` drives bus `i` for
/// the whole run.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftAssignment {
    drivers: Vec<Driver>,
}

impl ShiftAssignment {
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self { drivers }
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// A copy with every driver's run-time state cleared, ready to be
    /// simulated without leaking state from a previous run.
    pub fn fresh(&self) -> Self {
        let mut drivers = self.drivers.clone();
        drivers.iter_mut().for_each(Driver::reset);
        Self { drivers }
    }

    pub fn regular_count(&self) -> usize {
        self.drivers.iter().filter(|d| d.kind().is_regular()).count()
    }

    /// `(bus, driver)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BusId, &Driver)> {
        self.drivers
            .iter()
            .enumerate()
            .map(|(i, d)| (BusId(i as u16), d))
    }
}

impl From<Vec<Driver>> for ShiftAssignment {
    fn from(drivers: Vec<Driver>) -> Self {
        Self::new(drivers)
    }
}

impl Index<usize> for ShiftAssignment {
    type Output = Driver;
    fn index(&self, slot: usize) -> &Driver {
        &self.drivers[slot]
    }
}

impl IndexMut<usize> for ShiftAssignment {
    fn index_mut(&mut self, slot: usize) -> &mut Driver {
        &mut self.drivers[slot]
    }
}

impl fmt::Display for ShiftAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (bus, driver) in self.iter() {
            writeln!(f, "{:<7} {driver}", bus.to_string())?;
        }
        Ok(())
    }
}
