//! The `Sim` struct and its minute loop.

use sg_core::{BandedTraffic, RandomSource, SimClock, SimTime, StopId, TrafficModel};
use sg_fleet::{Bus, BusStop, DutyState, ShiftAssignment};

use crate::{NetworkConfig, NoopObserver, SimBuilder, SimObserver, SimResult, StopVisit};

/// Totals for one run.  `transported` is the fitness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Passengers dropped off across all buses.
    pub transported: u64,
    /// Bus/stop visits made.
    pub visits: u64,
    /// Breaks started.
    pub breaks: u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner for one shift assignment.
///
/// `Sim<T>` owns the route, the fleet, and the drivers for a single run.
/// Bus `i` is driven by `drivers[i]` throughout.  Per-bus route position and
/// next departure are kept in parallel `Vec`s indexed by slot.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<T: TrafficModel = BandedTraffic> {
    pub config: NetworkConfig,

    /// Shared by every bus; one value per minute.
    pub clock: SimClock,

    pub stops: Vec<BusStop>,
    pub buses: Vec<Bus>,
    pub drivers: ShiftAssignment,

    /// Index into `stops` of each bus's current stop.
    pub positions: Vec<usize>,

    /// Earliest minute at which each bus may make its next visit.
    pub next_departure: Vec<SimTime>,

    pub traffic: T,

    pub(crate) summary: RunSummary,
}

impl<T: TrafficModel> Sim<T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current minute to `config.end`.
    pub fn run<R, O>(&mut self, rng: &mut R, observer: &mut O) -> RunSummary
    where
        R: RandomSource + ?Sized,
        O: SimObserver,
    {
        while !self.clock.is_finished() {
            let now = self.clock.now;
            observer.on_tick(now);
            self.process_minute(now, rng, observer);
            self.clock.advance();
        }
        observer.on_run_end(self.clock.now, &self.summary);
        self.summary
    }

    /// Run exactly `n` minutes from the current position (ignores `end`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_minutes<R, O>(&mut self, n: u64, rng: &mut R, observer: &mut O) -> RunSummary
    where
        R: RandomSource + ?Sized,
        O: SimObserver,
    {
        for _ in 0..n {
            let now = self.clock.now;
            observer.on_tick(now);
            self.process_minute(now, rng, observer);
            self.clock.advance();
        }
        self.summary
    }

    #[inline]
    pub fn final_stop(&self) -> usize {
        self.stops.len() - 1
    }

    // ── Core minute processing ────────────────────────────────────────────

    fn process_minute<R, O>(&mut self, now: SimTime, rng: &mut R, observer: &mut O)
    where
        R: RandomSource + ?Sized,
        O: SimObserver,
    {
        let final_stop = self.final_stop();

        // Slot order is fixed: stop queues are mutated bus 0 first.
        for slot in 0..self.buses.len() {
            let bus_id = self.buses[slot].id;
            let driver = &mut self.drivers[slot];

            // ── ① Duty ────────────────────────────────────────────────────
            let before = driver.state();
            let can_drive = driver.tick(now);
            if before.is_on_break() && !driver.state().is_on_break() {
                observer.on_break_end(bus_id, driver.id, now);
            }
            if before != DutyState::OffDuty && driver.state() == DutyState::OffDuty {
                observer.on_shift_end(bus_id, driver.id, now);
            }
            if !can_drive {
                continue;
            }

            // ── ② Schedule ────────────────────────────────────────────────
            if now < self.next_departure[slot] {
                continue;
            }

            // ── ③ Visit ───────────────────────────────────────────────────
            let position = self.positions[slot];
            let is_final = position == final_stop;
            let stop = &mut self.stops[position];
            let bus = &mut self.buses[slot];

            let arrived = stop.grow(now, &self.traffic, rng);
            let dropped_off = bus.drop_off(is_final, self.config.alight_chance, rng);
            let picked_up = bus.pickup(stop.waiting);
            stop.board(picked_up);

            self.summary.transported += dropped_off as u64;
            self.summary.visits += 1;

            // ── ④ Break ───────────────────────────────────────────────────
            let break_minutes = driver.try_start_break(now, is_final);
            if let Some(minutes) = break_minutes {
                self.summary.breaks += 1;
                observer.on_break_start(bus_id, driver.id, now, minutes);
            }

            observer.on_stop_visit(&StopVisit {
                time:          now,
                bus:           bus_id,
                driver:        driver.id,
                stop:          StopId(position as u16),
                final_stop:    is_final,
                arrived,
                dropped_off,
                picked_up,
                waiting_after: stop.waiting,
                load_after:    bus.load(),
                break_minutes,
            });

            // ── ⑤ Move ────────────────────────────────────────────────────
            self.positions[slot] = (position + 1) % self.stops.len();
            let travel = self.traffic.travel_minutes(now, rng);
            self.next_departure[slot] = now + break_minutes.unwrap_or(0) as u64 + travel as u64;
        }
    }
}

// ── Fitness oracle ────────────────────────────────────────────────────────────

/// Simulate `assignment` once over the full horizon and return the number of
/// passengers transported.
///
/// The assignment is copied and reset first, so the caller's drivers carry
/// no state out of (or into) the run.
pub fn evaluate<T, R>(
    config:     &NetworkConfig,
    assignment: &ShiftAssignment,
    traffic:    T,
    rng:        &mut R,
) -> SimResult<u64>
where
    T: TrafficModel,
    R: RandomSource + ?Sized,
{
    let mut sim = SimBuilder::new(config.clone(), assignment.fresh())
        .traffic(traffic)
        .build(rng)?;
    Ok(sim.run(rng, &mut NoopObserver).transported)
}
