//! The generational loop.

use log::{debug, info};
use sg_core::RandomSource;
use sg_fleet::ShiftAssignment;
use sg_sim::NetworkConfig;

use crate::{
    crossover, generator::random_assignment, mutate, FitnessOracle, GaConfig, GaError, GaResult,
    SimulationFitness,
};

// ── Records ───────────────────────────────────────────────────────────────────

/// Fitness spread of one ranked generation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    pub generation: usize,
    pub best:       u64,
    /// Fitness at index `(n − 1) / 2` of the descending ranking.
    pub median:     u64,
    pub worst:      u64,
    pub mean:       f64,
}

impl GenerationStats {
    /// `fitness` must be sorted descending.
    fn from_ranked(generation: usize, fitness: &[u64]) -> Self {
        let n = fitness.len();
        if n == 0 {
            return Self { generation, best: 0, median: 0, worst: 0, mean: 0.0 };
        }
        Self {
            generation,
            best:   fitness[0],
            median: fitness[(n - 1) / 2],
            worst:  fitness[n - 1],
            mean:   fitness.iter().sum::<u64>() as f64 / n as f64,
        }
    }
}

/// Lineage of one crossover.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mating {
    /// Indices of the parents within the retained half (which are also their
    /// indices in the next population).
    pub parents:  (usize, usize),
    /// Crossover split point.
    pub split:    usize,
    /// Indices of the children in the next population.  The second child is
    /// `None` when it was cut off by the population size.
    pub children: (usize, Option<usize>),
    /// Slot redrawn in each child, if it mutated.
    pub mutated:  (Option<usize>, Option<usize>),
}

/// Outcome of one [`GeneticAlgorithm::step`].
#[derive(Clone, Debug)]
pub struct Generation {
    pub stats: GenerationStats,
    /// Fitness of the input population, sorted descending.
    pub ranked_fitness: Vec<u64>,
    /// Number of top-ranked individuals carried over unchanged.  They occupy
    /// `population[..retained]` in rank order.
    pub retained: usize,
    /// The next population: retained individuals followed by offspring.
    pub population: Vec<ShiftAssignment>,
    pub matings: Vec<Mating>,
}

/// Final result of [`GeneticAlgorithm::evolve`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evolution {
    pub best:         ShiftAssignment,
    pub best_fitness: u64,
    pub history:      Vec<GenerationStats>,
}

// ── GeneticAlgorithm ──────────────────────────────────────────────────────────

/// Truncation-selection GA over [`ShiftAssignment`]s.
pub struct GeneticAlgorithm<F: FitnessOracle> {
    pub config: GaConfig,
    pub oracle: F,
}

impl GeneticAlgorithm<SimulationFitness> {
    /// GA scored by the banded-traffic simulation of `network`, averaging
    /// `config.samples_per_evaluation` runs per call.
    pub fn with_simulation(config: GaConfig, network: NetworkConfig) -> GaResult<Self> {
        network.validate()?;
        let oracle = SimulationFitness::new(network).with_samples(config.samples_per_evaluation);
        Self::new(config, oracle)
    }
}

impl<F: FitnessOracle> GeneticAlgorithm<F> {
    /// Validates `config` up front so the loop itself cannot hit a
    /// degenerate pool.
    pub fn new(config: GaConfig, oracle: F) -> GaResult<Self> {
        config.validate()?;
        Ok(Self { config, oracle })
    }

    /// `population_size` independent random assignments.
    pub fn initial_population<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> GaResult<Vec<ShiftAssignment>> {
        (0..self.config.population_size)
            .map(|_| random_assignment(&self.config, rng))
            .collect()
    }

    /// Score every individual once and sort by fitness, best first.
    ///
    /// The sort is stable, so ties keep their input order.
    pub fn rank<R: RandomSource + ?Sized>(
        &self,
        population: Vec<ShiftAssignment>,
        rng:        &mut R,
    ) -> GaResult<Vec<(u64, ShiftAssignment)>> {
        let mut ranked = Vec::with_capacity(population.len());
        for individual in population {
            let fitness = self.oracle.fitness(&individual, rng)?;
            ranked.push((fitness, individual));
        }
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(ranked)
    }

    /// One generation: rank, keep the top half, refill with mutated
    /// offspring of distinct retained parents.
    pub fn step<R: RandomSource + ?Sized>(
        &self,
        generation: usize,
        population: Vec<ShiftAssignment>,
        rng:        &mut R,
    ) -> GaResult<Generation> {
        let target = self.config.population_size;
        let ranked = self.rank(population, rng)?;
        let ranked_fitness: Vec<u64> = ranked.iter().map(|(f, _)| *f).collect();
        let stats = GenerationStats::from_ranked(generation, &ranked_fitness);

        let retained = self.config.retained().min(ranked.len());
        let mut next: Vec<ShiftAssignment> = ranked
            .into_iter()
            .take(retained)
            .map(|(_, individual)| individual)
            .collect();
        next.reserve(target.saturating_sub(retained));

        let mut matings = Vec::new();
        while next.len() < target {
            let (i, j) = rng.distinct_pair(retained).ok_or(GaError::PoolTooSmall(retained))?;
            let (mut child_a, mut child_b, split) = crossover(&next[i], &next[j], rng);
            let rate = self.config.mutation_rate;
            let mutated_a = mutate(&mut child_a, rate, &self.config.rules, rng)?;
            let mutated_b = mutate(&mut child_b, rate, &self.config.rules, rng)?;

            let index_a = next.len();
            next.push(child_a);
            let index_b = if next.len() < target {
                next.push(child_b);
                Some(next.len() - 1)
            } else {
                None
            };

            debug!(
                "generation {generation}: parents ({i}, {j}) split {split} \
                 → children ({index_a}, {index_b:?}), mutated ({mutated_a:?}, {mutated_b:?})"
            );
            matings.push(Mating {
                parents:  (i, j),
                split,
                children: (index_a, index_b),
                mutated:  (mutated_a, mutated_b),
            });
        }

        Ok(Generation { stats, ranked_fitness, retained, population: next, matings })
    }

    /// Run `config.generations` generations from a random start and return
    /// the best individual of the final population.
    ///
    /// The final pick uses one fresh evaluation per individual, so with a
    /// noisy oracle `best_fitness` need not match any value in `history`.
    pub fn evolve<R: RandomSource + ?Sized>(&self, rng: &mut R) -> GaResult<Evolution> {
        let mut population = self.initial_population(rng)?;
        let mut history = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            let next = self.step(generation, population, rng)?;
            let s = next.stats;
            info!(
                "generation {:>4}: best {:>6}  median {:>6}  worst {:>6}  mean {:>9.1}",
                s.generation, s.best, s.median, s.worst, s.mean
            );
            history.push(s);
            population = next.population;
        }

        let (best_fitness, best) = self
            .rank(population, rng)?
            .into_iter()
            .next()
            .ok_or(GaError::PoolTooSmall(0))?;
        info!("final pick: fitness {best_fitness}");

        Ok(Evolution { best, best_fitness, history })
    }
}
