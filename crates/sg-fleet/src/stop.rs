//! A stop on the circular route and its queue of waiting passengers.

use sg_core::{RandomSource, SimTime, StopId, TrafficModel};

/// Upper bound of the uniform draw for a stop's queue at the start of a run.
pub const DEFAULT_INITIAL_WAITING_MAX: u32 = 66;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusStop {
    pub id: StopId,
    /// Unsigned, so the "never negative" clamp is structural.
    pub waiting: u32,
}

impl BusStop {
    pub fn new(id: StopId, waiting: u32) -> Self {
        Self { id, waiting }
    }

    /// A stop whose initial queue is uniform in `[0, max_waiting]`.
    pub fn seeded<R: RandomSource + ?Sized>(id: StopId, max_waiting: u32, rng: &mut R) -> Self {
        Self::new(id, rng.range_inclusive(0, max_waiting))
    }

    /// Add the passengers that arrived since the last visit.  Returns the
    /// number added.
    pub fn grow<T, R>(&mut self, now: SimTime, traffic: &T, rng: &mut R) -> u32
    where
        T: TrafficModel,
        R: RandomSource + ?Sized,
    {
        let arrived = traffic.arrivals(now, rng);
        self.waiting = self.waiting.saturating_add(arrived);
        arrived
    }

    /// Remove `boarded` passengers from the queue.
    #[inline]
    pub fn board(&mut self, boarded: u32) {
        self.waiting = self.waiting.saturating_sub(boarded);
    }
}
