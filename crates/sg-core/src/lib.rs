//! `sg-core` — foundational types for the `shift_ga` optimiser.
//!
//! This crate is a dependency of every other `sg-*` crate.  It intentionally
//! has no `sg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BusId`, `StopId`, `DriverId`                         |
//! | [`time`]        | `SimTime`, `SimDate`, `TimeOfDay`, `Weekday`, `SimClock` |
//! | [`rng`]         | `RandomSource` trait, `SimRng`                        |
//! | [`band`]        | `TrafficBand`, `TrafficModel`, `BandedTraffic`        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod band;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use band::{BandedTraffic, TrafficBand, TrafficModel};
pub use error::{CoreError, CoreResult};
pub use ids::{BusId, DriverId, StopId};
pub use rng::{RandomSource, SimRng};
pub use time::{SimClock, SimDate, SimTime, TimeOfDay, Weekday, MINUTES_PER_DAY};
