//! `sg-sim` — minute-step simulation of a circular bus route.
//!
//! # Tick loop
//!
//! ```text
//! for now in start..end (1-minute steps):
//!   for slot in 0..bus_count (fixed slot order):
//!     ① Duty     — advance the driver's state machine; skip if not Working.
//!     ② Schedule — skip if now < the bus's next departure.
//!     ③ Visit    — grow the stop queue, drop off, pick up.
//!     ④ Break    — final-stop visits may start a break (defers departure).
//!     ⑤ Move     — advance one stop; next departure = now + break + travel.
//! ```
//!
//! The total number of passengers dropped off is the fitness of the shift
//! assignment.  Every draw comes from the caller's random source, so the
//! result is a noisy sample, not a deterministic score.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sg_core::SimRng;
//! use sg_sim::{NetworkConfig, NoopObserver, SimBuilder};
//!
//! let mut rng = SimRng::from_entropy();
//! let mut sim = SimBuilder::new(NetworkConfig::default(), assignment).build(&mut rng)?;
//! let summary = sim.run(&mut rng, &mut NoopObserver);
//! println!("{} passengers", summary.transported);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::NetworkConfig;
pub use error::{SimError, SimResult};
pub use observer::{LogObserver, NoopObserver, SimObserver, StopVisit, TraceRecorder};
pub use sim::{evaluate, RunSummary, Sim};
