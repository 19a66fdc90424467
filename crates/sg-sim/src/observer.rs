//! Simulation observer trait for tracing and reporting.
//!
//! The engine never prints.  Per-stop arrivals, breaks and shift ends are
//! delivered through [`SimObserver`] hooks, so the same loop serves the
//! silent fitness oracle and a traced replay.

use sg_core::{BusId, DriverId, SimTime, StopId};

use crate::RunSummary;

/// Everything that happened at one bus/stop visit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopVisit {
    pub time:          SimTime,
    pub bus:           BusId,
    pub driver:        DriverId,
    pub stop:          StopId,
    pub final_stop:    bool,
    /// Passengers who joined the queue since the previous visit.
    pub arrived:       u32,
    pub dropped_off:   u32,
    pub picked_up:     u32,
    /// Queue length after boarding.
    pub waiting_after: u32,
    /// Bus load after boarding.
    pub load_after:    u32,
    /// Break started at this visit, in minutes.
    pub break_minutes: Option<u32>,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the start of every simulated minute.
    fn on_tick(&mut self, _now: SimTime) {}

    /// Called after a bus finishes boarding at a stop.
    fn on_stop_visit(&mut self, _visit: &StopVisit) {}

    /// Called when a driver's break begins.
    fn on_break_start(&mut self, _bus: BusId, _driver: DriverId, _now: SimTime, _minutes: u32) {}

    /// Called when a break has run its full length.
    fn on_break_end(&mut self, _bus: BusId, _driver: DriverId, _now: SimTime) {}

    /// Called once when a driver goes off duty after working or resting.
    fn on_shift_end(&mut self, _bus: BusId, _driver: DriverId, _now: SimTime) {}

    /// Called once after the final minute.
    fn on_run_end(&mut self, _end: SimTime, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks, as in the fitness oracle.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

// ── TraceRecorder ─────────────────────────────────────────────────────────────

/// Records every stop visit and break in memory.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    pub visits: Vec<StopVisit>,
    pub breaks: Vec<(BusId, DriverId, SimTime, u32)>,
    pub break_ends: Vec<(BusId, DriverId, SimTime)>,
    pub shift_ends: Vec<(BusId, DriverId, SimTime)>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of drop-offs over every recorded visit.
    pub fn dropped_off_total(&self) -> u64 {
        self.visits.iter().map(|v| v.dropped_off as u64).sum()
    }

    /// Visits made by one bus, in time order.
    pub fn visits_for(&self, bus: BusId) -> impl Iterator<Item = &StopVisit> {
        self.visits.iter().filter(move |v| v.bus == bus)
    }
}

impl SimObserver for TraceRecorder {
    fn on_stop_visit(&mut self, visit: &StopVisit) {
        self.visits.push(visit.clone());
    }

    fn on_break_start(&mut self, bus: BusId, driver: DriverId, now: SimTime, minutes: u32) {
        self.breaks.push((bus, driver, now, minutes));
    }

    fn on_break_end(&mut self, bus: BusId, driver: DriverId, now: SimTime) {
        self.break_ends.push((bus, driver, now));
    }

    fn on_shift_end(&mut self, bus: BusId, driver: DriverId, now: SimTime) {
        self.shift_ends.push((bus, driver, now));
    }
}

// ── LogObserver ───────────────────────────────────────────────────────────────

/// Emits `log` records: visits at `trace`, breaks and shift ends at `debug`,
/// the run summary at `info`.
pub struct LogObserver;

impl SimObserver for LogObserver {
    fn on_stop_visit(&mut self, v: &StopVisit) {
        log::trace!(
            "{} {} at {}: +{} arrived, {} off, {} on, {} waiting, load {}",
            v.time,
            v.bus,
            v.stop,
            v.arrived,
            v.dropped_off,
            v.picked_up,
            v.waiting_after,
            v.load_after,
        );
    }

    fn on_break_start(&mut self, bus: BusId, driver: DriverId, now: SimTime, minutes: u32) {
        log::debug!("{now} {driver} on {bus} starts a {minutes}-minute break");
    }

    fn on_break_end(&mut self, bus: BusId, driver: DriverId, now: SimTime) {
        log::debug!("{now} {driver} on {bus} is back from break");
    }

    fn on_shift_end(&mut self, bus: BusId, driver: DriverId, now: SimTime) {
        log::debug!("{now} {driver} on {bus} goes off duty");
    }

    fn on_run_end(&mut self, end: SimTime, summary: &RunSummary) {
        log::info!(
            "run ended at {end}: {} passengers transported over {} visits, {} breaks",
            summary.transported, summary.visits, summary.breaks,
        );
    }
}
