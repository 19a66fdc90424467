//! `sg-ga` — genetic search over driver-shift assignments.
//!
//! # Encoding
//!
//! An individual is a [`ShiftAssignment`][sg_fleet::ShiftAssignment]: one
//! driver per bus slot.  Each gene is a whole driver (kind, weekly template,
//! and for Rotating drivers an anchor date).
//!
//! # Generation
//!
//! ```text
//! rank      — evaluate every individual once, sort by fitness (descending)
//! retain    — keep the top half unchanged
//! refill    — until the population is full again:
//!               pick two distinct retained parents
//!               single-point crossover → two children
//!               mutate each child with probability `mutation_rate`
//! ```
//!
//! Fitness comes from a [`FitnessOracle`]; the production oracle is
//! [`SimulationFitness`], which runs the `sg-sim` engine.  Because the engine
//! re-draws the whole week on every call, fitness is noisy: the reported
//! best-per-generation is not guaranteed to rise monotonically.
//!
//! # Submodules
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`config`]    | `GaConfig`, `ShiftRules`                               |
//! | [`generator`] | Random templates, anchors, and whole assignments       |
//! | [`operators`] | `crossover`, `crossover_at`, `mutate`                  |
//! | [`fitness`]   | `FitnessOracle` trait, `SimulationFitness`             |
//! | [`algorithm`] | `GeneticAlgorithm`, `Generation`, `Evolution`          |
//! | [`error`]     | `GaError`, `GaResult<T>`                               |

pub mod algorithm;
pub mod config;
pub mod error;
pub mod fitness;
pub mod generator;
pub mod operators;


pub use algorithm::{Evolution, Generation, GenerationStats, GeneticAlgorithm, Mating};
pub use config::{GaConfig, ShiftRules};
pub use error::{GaError, GaResult};
pub use fitness::{FitnessOracle, SimulationFitness};
pub use operators::{crossover, crossover_at, mutate};
