//! Fluent builder for constructing a [`Sim`].

use sg_core::{BandedTraffic, BusId, RandomSource, SimClock, StopId, TrafficModel};
use sg_fleet::{Bus, BusStop, ShiftAssignment};

use crate::{NetworkConfig, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<T>`].
///
/// # Required inputs
///
/// - [`NetworkConfig`] — stops, capacity, horizon, …
/// - [`ShiftAssignment`] — one driver per bus; its length is the bus count
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                      |
/// |-------------------------|----------------------------------------------|
/// | `.traffic(t)`           | [`BandedTraffic`]                            |
/// | `.initial_waiting(v)`   | Uniform in `[0, config.initial_waiting_max]` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, assignment)
///     .initial_waiting(vec![0; 8])
///     .build(&mut rng)?;
/// sim.run(&mut rng, &mut NoopObserver);
/// ```
pub struct SimBuilder<T: TrafficModel = BandedTraffic> {
    config:          NetworkConfig,
    drivers:         ShiftAssignment,
    traffic:         T,
    initial_waiting: Option<Vec<u32>>,
}

impl SimBuilder<BandedTraffic> {
    /// Create a builder with all required inputs.
    pub fn new(config: NetworkConfig, drivers: ShiftAssignment) -> Self {
        Self {
            config,
            drivers,
            traffic: BandedTraffic,
            initial_waiting: None,
        }
    }
}

impl<T: TrafficModel> SimBuilder<T> {
    /// Replace the traffic model used for travel times and arrivals.
    pub fn traffic<U: TrafficModel>(self, traffic: U) -> SimBuilder<U> {
        SimBuilder {
            config:          self.config,
            drivers:         self.drivers,
            traffic,
            initial_waiting: self.initial_waiting,
        }
    }

    /// Supply each stop's initial queue (must be length `stop_count`).
    pub fn initial_waiting(mut self, waiting: Vec<u32>) -> Self {
        self.initial_waiting = Some(waiting);
        self
    }

    /// Validate inputs, seed the stop queues, and return a ready-to-run
    /// [`Sim`].
    ///
    /// Random initial queues are drawn here, in stop order, before any
    /// simulated minute.
    pub fn build<R: RandomSource + ?Sized>(self, rng: &mut R) -> SimResult<Sim<T>> {
        self.config.validate()?;
        if self.drivers.is_empty() {
            return Err(SimError::EmptyAssignment);
        }
        let stop_count = self.config.stop_count;
        let bus_count = self.drivers.len();
        if bus_count > u16::MAX as usize || stop_count > u16::MAX as usize {
            return Err(SimError::Config(format!(
                "{bus_count} buses / {stop_count} stops exceed the id range"
            )));
        }

        // ── Stops ─────────────────────────────────────────────────────────
        let stops: Vec<BusStop> = match self.initial_waiting {
            Some(waiting) => {
                if waiting.len() != stop_count {
                    return Err(SimError::LengthMismatch {
                        expected:      stop_count,
                        got:           waiting.len(),
                        what:          "initial waiting counts",
                        expected_what: "stop count",
                    });
                }
                waiting
                    .into_iter()
                    .enumerate()
                    .map(|(i, w)| BusStop::new(StopId(i as u16), w))
                    .collect()
            }
            None => (0..stop_count)
                .map(|i| BusStop::seeded(StopId(i as u16), self.config.initial_waiting_max, rng))
                .collect(),
        };

        // ── Fleet ─────────────────────────────────────────────────────────
        let buses: Vec<Bus> = (0..bus_count)
            .map(|i| Bus::new(BusId(i as u16), self.config.bus_capacity))
            .collect();

        let stagger = self.config.departure_stagger_minutes as u64;
        let next_departure = (0..bus_count as u64)
            .map(|i| self.config.start + i * stagger)
            .collect();

        Ok(Sim {
            clock:          SimClock::new(self.config.start, self.config.end),
            config:         self.config,
            stops,
            buses,
            drivers:        self.drivers,
            positions:      vec![0; bus_count],
            next_departure,
            traffic:        self.traffic,
            summary:        Default::default(),
        })
    }
}
