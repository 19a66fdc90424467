//! Traffic bands and the travel-time / passenger-arrival draws derived from
//! them.
//!
//! | Band      | Hours                      | Travel (min) | Arrivals per visit |
//! |-----------|----------------------------|--------------|--------------------|
//! | `Peak`    | 07:00–09:00, 17:00–19:00   | 10–11        | 5–22               |
//! | `Midday`  | 09:00–17:00                | 11–12        | 2–12               |
//! | `OffPeak` | everything else            | 12–13        | 0–7                |
//!
//! All ranges are inclusive.  Band boundaries are hour-based and
//! end-exclusive (09:00 is already `Midday`).

use crate::{RandomSource, SimTime, TimeOfDay};

/// Traffic regime for a given hour of the day.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrafficBand {
    Peak,
    Midday,
    OffPeak,
}

impl TrafficBand {
    pub fn of(time: TimeOfDay) -> TrafficBand {
        match time.hour() {
            7 | 8 | 17 | 18 => TrafficBand::Peak,
            9..=16 => TrafficBand::Midday,
            _ => TrafficBand::OffPeak,
        }
    }

    #[inline]
    pub fn at(now: SimTime) -> TrafficBand {
        Self::of(now.time_of_day())
    }

    /// Inclusive travel-time range between consecutive stops, in minutes.
    pub fn travel_range(self) -> (u32, u32) {
        match self {
            TrafficBand::Peak => (10, 11),
            TrafficBand::Midday => (11, 12),
            TrafficBand::OffPeak => (12, 13),
        }
    }

    /// Inclusive range of new passengers arriving at a stop per visit.
    pub fn arrival_range(self) -> (u32, u32) {
        match self {
            TrafficBand::Peak => (5, 22),
            TrafficBand::Midday => (2, 12),
            TrafficBand::OffPeak => (0, 7),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficBand::Peak => "peak",
            TrafficBand::Midday => "midday",
            TrafficBand::OffPeak => "off-peak",
        }
    }
}

impl std::fmt::Display for TrafficBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TrafficModel ──────────────────────────────────────────────────────────────

/// Source of travel times and passenger arrivals for the simulation engine.
///
/// The engine only ever talks to this trait, so tests can stub demand out
/// entirely (e.g. zero arrivals, fixed travel time) without touching the
/// random source.
pub trait TrafficModel {
    /// Minutes until the bus reaches the next stop, departing at `now`.
    fn travel_minutes<R: RandomSource + ?Sized>(&self, now: SimTime, rng: &mut R) -> u32;

    /// New passengers who arrived at a stop since the last visit.
    fn arrivals<R: RandomSource + ?Sized>(&self, now: SimTime, rng: &mut R) -> u32;
}

/// The default traffic model: uniform draws from the ranges in the module
/// table.
#[derive(Copy, Clone, Debug, Default)]
pub struct BandedTraffic;

impl TrafficModel for BandedTraffic {
    #[inline]
    fn travel_minutes<R: RandomSource + ?Sized>(&self, now: SimTime, rng: &mut R) -> u32 {
        let (lo, hi) = TrafficBand::at(now).travel_range();
        rng.range_inclusive(lo, hi)
    }

    #[inline]
    fn arrivals<R: RandomSource + ?Sized>(&self, now: SimTime, rng: &mut R) -> u32 {
        let (lo, hi) = TrafficBand::at(now).arrival_range();
        rng.range_inclusive(lo, hi)
    }
}

impl<T: TrafficModel> TrafficModel for &T {
    fn travel_minutes<R: RandomSource + ?Sized>(&self, now: SimTime, rng: &mut R) -> u32 {
        (**self).travel_minutes(now, rng)
    }

    fn arrivals<R: RandomSource + ?Sized>(&self, now: SimTime, rng: &mut R) -> u32 {
        (**self).arrivals(now, rng)
    }
}
