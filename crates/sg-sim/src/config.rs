//! Network configuration for one simulation run.

use sg_core::{SimDate, SimTime, TimeOfDay};
use sg_fleet::bus::DEFAULT_CAPACITY;
use sg_fleet::stop::DEFAULT_INITIAL_WAITING_MAX;

use crate::{SimError, SimResult};

/// Fixed description of the route and the simulated horizon.
///
/// The bus count is not configured here: it is the length of the shift
/// assignment being evaluated.  Typically built with `Default` or loaded
/// from a JSON run file by the application crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    /// Stops on the circular route.  The last index is the final stop.
    pub stop_count: usize,

    /// Capacity of every bus.
    pub bus_capacity: u32,

    /// First simulated minute.
    pub start: SimTime,

    /// End of the horizon (exclusive).
    pub end: SimTime,

    /// Probability that some passengers alight at a non-final stop.
    pub alight_chance: f64,

    /// Each stop's initial queue is uniform in `[0, initial_waiting_max]`.
    pub initial_waiting_max: u32,

    /// Bus `i` first departs at `start + i * departure_stagger_minutes`.
    pub departure_stagger_minutes: u32,
}

impl Default for NetworkConfig {
    /// Eight stops, capacity 26, Monday 07:00 to the following Monday 23:59.
    fn default() -> Self {
        Self {
            stop_count: 8,
            bus_capacity: DEFAULT_CAPACITY,
            start: SimDate(0).at(TimeOfDay::hm(7, 0)),
            end: SimDate(7).at(TimeOfDay::hm(23, 59)),
            alight_chance: 0.6,
            initial_waiting_max: DEFAULT_INITIAL_WAITING_MAX,
            departure_stagger_minutes: 0,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.stop_count == 0 {
            return Err(SimError::Config("route needs at least one stop".into()));
        }
        if self.bus_capacity == 0 {
            return Err(SimError::Config("bus capacity must be positive".into()));
        }
        if self.end <= self.start {
            return Err(SimError::Config(format!(
                "horizon end ({}) must be after start ({})",
                self.end, self.start
            )));
        }
        if !(0.0..=1.0).contains(&self.alight_chance) {
            return Err(SimError::Config(format!(
                "alight_chance {} is not a probability",
                self.alight_chance
            )));
        }
        Ok(())
    }

    /// Number of one-minute ticks in the horizon.
    #[inline]
    pub fn horizon_minutes(&self) -> u64 {
        self.end.since(self.start)
    }
}
