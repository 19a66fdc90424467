//! A single bus: fixed capacity, current load.

use sg_core::{BusId, RandomSource};

/// Default seated-plus-standing capacity of a route bus.
pub const DEFAULT_CAPACITY: u32 = 26;

/// A bus and its passengers.
///
/// `load` is private so the `0 ≤ load ≤ capacity` invariant can only be
/// changed through [`Bus::pickup`] and [`Bus::drop_off`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bus {
    pub id: BusId,
    capacity: u32,
    load: u32,
}

impl Bus {
    pub fn new(id: BusId, capacity: u32) -> Self {
        Self { id, capacity, load: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn load(&self) -> u32 {
        self.load
    }

    #[inline]
    pub fn free_seats(&self) -> u32 {
        self.capacity - self.load
    }

    /// Board up to `waiting` passengers.  Returns how many got on.
    pub fn pickup(&mut self, waiting: u32) -> u32 {
        let boarded = waiting.min(self.free_seats());
        self.load += boarded;
        boarded
    }

    /// Let passengers off.  Returns how many left the bus.
    ///
    /// At the final stop everybody leaves.  Elsewhere, with probability
    /// `alight_chance` a uniform share in `[0, load]` leaves; otherwise
    /// nobody does.
    pub fn drop_off<R: RandomSource + ?Sized>(
        &mut self,
        is_final_stop: bool,
        alight_chance: f64,
        rng: &mut R,
    ) -> u32 {
        let dropped = if is_final_stop {
            self.load
        } else if rng.chance(alight_chance) {
            rng.range_inclusive(0, self.load)
        } else {
            0
        };
        self.load -= dropped;
        dropped
    }
}
