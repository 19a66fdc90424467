//! weekly — search a week of driver shifts for an 8-bus loop route.
//!
//! Usage: `weekly [run-config.json]`.  Without a file the defaults apply:
//! 8 stops, 8 buses, population 100, 100 generations.  Set `RUST_LOG=debug`
//! for per-mating lineage and breaks during the replay.

mod config;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::info;

use sg_core::{BusId, DriverId, SimRng, SimTime};
use sg_ga::GeneticAlgorithm;
use sg_sim::{LogObserver, RunSummary, SimBuilder, SimObserver, StopVisit};

use config::RunConfig;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_LOG_FILTER: &str = "info";
const REPLAY_STREAM:      u64  = 1;

// ── Replay observer ───────────────────────────────────────────────────────────

/// Forwards to [`LogObserver`] and tallies drop-offs per bus.
struct ReplayObserver {
    inner:       LogObserver,
    dropped_off: Vec<u64>,
    breaks:      Vec<u32>,
}

impl ReplayObserver {
    fn new(buses: usize) -> Self {
        Self { inner: LogObserver, dropped_off: vec![0; buses], breaks: vec![0; buses] }
    }
}

impl SimObserver for ReplayObserver {
    fn on_stop_visit(&mut self, visit: &StopVisit) {
        self.dropped_off[visit.bus.index()] += visit.dropped_off as u64;
        self.inner.on_stop_visit(visit);
    }

    fn on_break_start(&mut self, bus: BusId, driver: DriverId, now: SimTime, minutes: u32) {
        self.breaks[bus.index()] += 1;
        self.inner.on_break_start(bus, driver, now, minutes);
    }

    fn on_break_end(&mut self, bus: BusId, driver: DriverId, now: SimTime) {
        self.inner.on_break_end(bus, driver, now);
    }

    fn on_shift_end(&mut self, bus: BusId, driver: DriverId, now: SimTime) {
        self.inner.on_shift_end(bus, driver, now);
    }

    fn on_run_end(&mut self, end: SimTime, summary: &RunSummary) {
        self.inner.on_run_end(end, summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    // 1. Run configuration.
    let run = match std::env::args().nth(1) {
        Some(path) => RunConfig::load(Path::new(&path))?,
        None => RunConfig::default(),
    };
    let RunConfig { network, ga: ga_config, seed } = run;

    println!("=== weekly — bus driver shift search ===");
    println!(
        "Stops: {}  |  Buses: {}  |  Horizon: {} → {}",
        network.stop_count, ga_config.slots, network.start, network.end
    );
    println!(
        "Population: {}  |  Generations: {}  |  Mutation: {}  |  Samples/eval: {}",
        ga_config.population_size,
        ga_config.generations,
        ga_config.mutation_rate,
        ga_config.samples_per_evaluation
    );

    let mut rng = match seed {
        Some(seed) => {
            println!("Seed: {seed}");
            SimRng::new(seed)
        }
        None => {
            println!("Seed: entropy (run is not reproducible)");
            SimRng::from_entropy()
        }
    };
    println!();

    // 2. Search.
    let ga = GeneticAlgorithm::with_simulation(ga_config, network.clone())?;
    let t0 = Instant::now();
    let evolution = ga.evolve(&mut rng)?;
    let elapsed = t0.elapsed();
    info!("search finished in {:.3} s", elapsed.as_secs_f64());

    // 3. History.
    println!("{:<6} {:>8} {:>8} {:>8} {:>10}", "Gen", "Best", "Median", "Worst", "Mean");
    println!("{}", "-".repeat(44));
    for s in &evolution.history {
        println!(
            "{:<6} {:>8} {:>8} {:>8} {:>10.1}",
            s.generation, s.best, s.median, s.worst, s.mean
        );
    }
    println!();

    // 4. Best assignment.
    println!(
        "Best assignment ({} regular, {} rotating), fitness {}:",
        evolution.best.regular_count(),
        evolution.best.len() - evolution.best.regular_count(),
        evolution.best_fitness
    );
    print!("{}", evolution.best);
    println!();

    // 5. Replay the winner once on its own random stream.
    let mut replay_rng = rng.child(REPLAY_STREAM);
    let mut sim = SimBuilder::new(network, evolution.best.fresh()).build(&mut replay_rng)?;
    let mut obs = ReplayObserver::new(sim.buses.len());
    let summary = sim.run(&mut replay_rng, &mut obs);

    println!("Replay: {} passengers transported, {} visits", summary.transported, summary.visits);
    println!("{:<8} {:<10} {:>12} {:>8}", "Bus", "Driver", "Dropped off", "Breaks");
    println!("{}", "-".repeat(41));
    for (bus, driver) in evolution.best.iter() {
        let i = bus.index();
        println!(
            "{:<8} {:<10} {:>12} {:>8}",
            bus.to_string(),
            driver.id.to_string(),
            obs.dropped_off[i],
            obs.breaks[i]
        );
    }

    Ok(())
}
