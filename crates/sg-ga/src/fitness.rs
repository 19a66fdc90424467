//! The `FitnessOracle` trait and the simulation-backed oracle.

use sg_core::{BandedTraffic, RandomSource, TrafficModel};
use sg_fleet::ShiftAssignment;
use sg_sim::{evaluate, NetworkConfig};

use crate::GaResult;

/// Scores an assignment.  Higher is better.
///
/// Oracles may be stochastic: the same assignment can score differently on
/// successive calls.  The GA never caches scores across generations.
pub trait FitnessOracle {
    fn fitness<R: RandomSource + ?Sized>(
        &self,
        assignment: &ShiftAssignment,
        rng:        &mut R,
    ) -> GaResult<u64>;
}

/// Passengers transported over the simulated week, averaged (integer mean)
/// over `samples` independent runs.
pub struct SimulationFitness<T: TrafficModel = BandedTraffic> {
    pub network: NetworkConfig,
    pub traffic: T,
    pub samples: u32,
}

impl SimulationFitness<BandedTraffic> {
    /// One banded-traffic run per evaluation.
    pub fn new(network: NetworkConfig) -> Self {
        Self {
            network,
            traffic: BandedTraffic,
            samples: 1,
        }
    }
}

impl<T: TrafficModel> SimulationFitness<T> {
    pub fn with_traffic<U: TrafficModel>(self, traffic: U) -> SimulationFitness<U> {
        SimulationFitness {
            network: self.network,
            traffic,
            samples: self.samples,
        }
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples.max(1);
        self
    }
}

impl<T: TrafficModel> FitnessOracle for SimulationFitness<T> {
    fn fitness<R: RandomSource + ?Sized>(
        &self,
        assignment: &ShiftAssignment,
        rng:        &mut R,
    ) -> GaResult<u64> {
        let samples = self.samples.max(1) as u64;
        let mut total = 0;
        for _ in 0..samples {
            total += evaluate(&self.network, assignment, &self.traffic, rng)?;
        }
        Ok(total / samples)
    }
}
