//! Integration tests for sg-sim.

use sg_core::{
    BusId, DriverId, RandomSource, SimDate, SimRng, SimTime, TimeOfDay, TrafficModel,
};
use sg_fleet::{Driver, ShiftAssignment, ShiftWindow, WeekTemplate};

use crate::{NetworkConfig, NoopObserver, SimBuilder, SimObserver, TraceRecorder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Deterministic traffic: constant travel time and arrivals.
struct FixedTraffic {
    travel:   u32,
    arrivals: u32,
}

impl TrafficModel for FixedTraffic {
    fn travel_minutes<R: RandomSource + ?Sized>(&self, _now: SimTime, _rng: &mut R) -> u32 {
        self.travel
    }
    fn arrivals<R: RandomSource + ?Sized>(&self, _now: SimTime, _rng: &mut R) -> u32 {
        self.arrivals
    }
}

fn at(day: u32, hour: u16, minute: u16) -> SimTime {
    SimDate(day).at(TimeOfDay::hm(hour, minute))
}

fn window(start: TimeOfDay, end: TimeOfDay) -> ShiftWindow {
    ShiftWindow::new(start, end).unwrap()
}

fn test_config(stop_count: usize, start: SimTime, end: SimTime) -> NetworkConfig {
    NetworkConfig {
        stop_count,
        start,
        end,
        ..NetworkConfig::default()
    }
}

fn regular(id: u16, start: TimeOfDay, end: TimeOfDay) -> Driver {
    Driver::regular(DriverId(id), WeekTemplate::weekdays(window(start, end)))
}

fn idle(id: u16) -> Driver {
    Driver::regular(DriverId(id), WeekTemplate::off())
}

fn all_day_rotating(id: u16, anchor: Option<SimDate>) -> Driver {
    Driver::rotating(
        DriverId(id),
        WeekTemplate::every_day(window(TimeOfDay::MIDNIGHT, TimeOfDay::hm(23, 59))),
        anchor,
    )
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_defaults() {
        let mut rng = SimRng::new(1);
        let drivers = ShiftAssignment::new((0..8).map(idle).collect());
        let sim = SimBuilder::new(NetworkConfig::default(), drivers).build(&mut rng).unwrap();
        assert_eq!(sim.buses.len(), 8);
        assert_eq!(sim.stops.len(), 8);
        assert!(sim.buses.iter().all(|b| b.capacity() == 26 && b.load() == 0));
        assert!(sim.stops.iter().all(|s| s.waiting <= 66));
        assert!(sim.positions.iter().all(|&p| p == 0));
        assert!(sim.next_departure.iter().all(|&t| t == at(0, 7, 0)));
    }

    #[test]
    fn default_horizon_spans_the_week() {
        let config = NetworkConfig::default();
        assert_eq!(config.start, at(0, 7, 0));
        assert_eq!(config.end, at(7, 23, 59));
        assert_eq!(config.horizon_minutes(), 7 * 1_440 + 16 * 60 + 59);
    }

    #[test]
    fn empty_assignment_errors() {
        let mut rng = SimRng::new(1);
        let result = SimBuilder::new(NetworkConfig::default(), ShiftAssignment::default())
            .build(&mut rng);
        assert!(matches!(result, Err(SimError::EmptyAssignment)));
    }

    #[test]
    fn initial_waiting_length_mismatch_errors() {
        let mut rng = SimRng::new(1);
        let result = SimBuilder::new(NetworkConfig::default(), vec![idle(0)].into())
            .initial_waiting(vec![0; 3])
            .build(&mut rng);
        assert!(matches!(result, Err(SimError::LengthMismatch { expected: 8, got: 3, .. })));
    }

    #[test]
    fn invalid_configs_rejected() {
        let bad = [
            NetworkConfig { stop_count: 0, ..NetworkConfig::default() },
            NetworkConfig { bus_capacity: 0, ..NetworkConfig::default() },
            NetworkConfig { end: at(0, 7, 0), ..NetworkConfig::default() },
            NetworkConfig { alight_chance: 1.5, ..NetworkConfig::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
        assert!(NetworkConfig::default().validate().is_ok());
    }

    #[test]
    fn departures_staggered_by_slot() {
        let mut rng = SimRng::new(1);
        let config = NetworkConfig { departure_stagger_minutes: 5, ..NetworkConfig::default() };
        let sim = SimBuilder::new(config, ShiftAssignment::new((0..3).map(idle).collect()))
            .build(&mut rng)
            .unwrap();
        assert_eq!(sim.next_departure, vec![at(0, 7, 0), at(0, 7, 5), at(0, 7, 10)]);
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_end_of_horizon() {
        let mut rng = SimRng::new(2);
        let config = test_config(4, at(0, 6, 0), at(0, 9, 0));
        let mut sim = SimBuilder::new(config, vec![idle(0)].into()).build(&mut rng).unwrap();
        sim.run(&mut rng, &mut NoopObserver);
        assert_eq!(sim.clock.now, at(0, 9, 0));
    }

    /// Observer that counts minutes.
    struct MinuteCounter {
        ticks: u64,
        ended: bool,
    }
    impl SimObserver for MinuteCounter {
        fn on_tick(&mut self, _now: SimTime) {
            self.ticks += 1;
        }
        fn on_run_end(&mut self, _end: SimTime, _s: &crate::RunSummary) {
            self.ended = true;
        }
    }

    #[test]
    fn observer_called_once_per_minute() {
        let mut rng = SimRng::new(2);
        let config = test_config(2, at(0, 6, 0), at(0, 7, 30));
        let mut sim = SimBuilder::new(config, vec![idle(0)].into()).build(&mut rng).unwrap();
        let mut obs = MinuteCounter { ticks: 0, ended: false };
        sim.run(&mut rng, &mut obs);
        assert_eq!(obs.ticks, 90);
        assert!(obs.ended);
    }

    #[test]
    fn run_minutes_advances_clock() {
        let mut rng = SimRng::new(2);
        let config = test_config(2, at(0, 6, 0), at(0, 7, 0));
        let mut sim = SimBuilder::new(config, vec![idle(0)].into()).build(&mut rng).unwrap();
        sim.run_minutes(5, &mut rng, &mut NoopObserver);
        assert_eq!(sim.clock.now, at(0, 6, 5));
        sim.run_minutes(3, &mut rng, &mut NoopObserver);
        assert_eq!(sim.clock.now, at(0, 6, 8));
    }

    #[test]
    fn off_duty_bus_never_moves() {
        let mut rng = SimRng::new(3);
        let config = test_config(4, at(0, 0, 0), at(1, 0, 0));
        let drivers = vec![idle(0), all_day_rotating(1, None)].into();
        let mut sim = SimBuilder::new(config, drivers).build(&mut rng).unwrap();
        let mut trace = TraceRecorder::new();
        sim.run(&mut rng, &mut trace);
        assert_eq!(trace.visits_for(BusId(0)).count(), 0);
        assert!(trace.visits_for(BusId(1)).count() > 0);
        assert_eq!(sim.positions[0], 0);
    }

    #[test]
    fn bus_circulates_in_route_order() {
        let mut rng = SimRng::new(4);
        let config = test_config(3, at(0, 10, 0), at(0, 12, 0));
        let drivers = vec![regular(0, TimeOfDay::hm(8, 0), TimeOfDay::hm(17, 0))].into();
        let mut sim = SimBuilder::new(config, drivers)
            .traffic(FixedTraffic { travel: 10, arrivals: 3 })
            .build(&mut rng)
            .unwrap();
        let mut trace = TraceRecorder::new();
        sim.run(&mut rng, &mut trace);

        let stops: Vec<u16> = trace.visits.iter().take(7).map(|v| v.stop.0).collect();
        assert_eq!(stops, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(trace.visits[0].time, at(0, 10, 0));
        assert_eq!(trace.visits[1].time, at(0, 10, 10));
        assert!(trace.visits.iter().all(|v| v.final_stop == (v.stop.0 == 2)));
    }

    #[test]
    fn load_and_queues_stay_in_bounds() {
        let mut rng = SimRng::new(5);
        let config = test_config(8, at(0, 7, 0), at(2, 0, 0));
        let drivers = ShiftAssignment::new(
            (0..4).map(|i| all_day_rotating(i, None)).collect(),
        );
        let mut sim = SimBuilder::new(config, drivers).build(&mut rng).unwrap();
        let mut trace = TraceRecorder::new();
        sim.run(&mut rng, &mut trace);

        assert!(!trace.visits.is_empty());
        for v in &trace.visits {
            assert!(v.load_after <= 26, "{v:?}");
            assert!(v.picked_up <= 26);
            if v.final_stop {
                assert_eq!(v.load_after, v.picked_up, "final stop empties before boarding");
            }
        }
    }

    #[test]
    fn shift_end_reported_once() {
        let mut rng = SimRng::new(6);
        let config = test_config(3, at(0, 7, 0), at(0, 10, 0));
        let drivers = vec![regular(0, TimeOfDay::hm(8, 0), TimeOfDay::hm(9, 0))].into();
        let mut sim = SimBuilder::new(config, drivers)
            .traffic(FixedTraffic { travel: 7, arrivals: 0 })
            .build(&mut rng)
            .unwrap();
        let mut trace = TraceRecorder::new();
        sim.run(&mut rng, &mut trace);
        assert_eq!(trace.shift_ends, vec![(BusId(0), DriverId(0), at(0, 9, 1))]);
    }
}

// ── Breaks ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod break_tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn regular_lunch_once_per_day_at_final_stop() {
        let mut rng = SimRng::new(7);
        let config = test_config(3, at(0, 8, 0), at(1, 17, 0));
        let drivers = vec![regular(0, TimeOfDay::hm(8, 0), TimeOfDay::hm(17, 0))].into();
        let mut sim = SimBuilder::new(config, drivers)
            .traffic(FixedTraffic { travel: 10, arrivals: 4 })
            .build(&mut rng)
            .unwrap();
        let mut trace = TraceRecorder::new();
        let summary = sim.run(&mut rng, &mut trace);

        let mut per_day: HashMap<SimDate, usize> = HashMap::new();
        for &(_, _, time, minutes) in &trace.breaks {
            assert_eq!(minutes, 60);
            let tod = time.time_of_day();
            assert!(tod >= TimeOfDay::hm(13, 0) && tod < TimeOfDay::hm(15, 0), "{time}");
            *per_day.entry(time.date()).or_default() += 1;
        }
        assert_eq!(per_day.get(&SimDate(0)), Some(&1));
        assert_eq!(per_day.get(&SimDate(1)), Some(&1));
        assert_eq!(summary.breaks, 2);

        for v in trace.visits.iter().filter(|v| v.break_minutes.is_some()) {
            assert!(v.final_stop);
            // The next visit waits out the break plus the drive.
            let next = trace.visits.iter().find(|n| n.time > v.time).unwrap();
            assert!(next.time >= v.time + 70, "{} -> {}", v.time, next.time);
        }
    }

    #[test]
    fn rotating_rests_at_every_final_stop_visit() {
        let mut rng = SimRng::new(8);
        let config = test_config(3, at(0, 6, 0), at(0, 12, 0));
        let drivers = vec![all_day_rotating(0, None)].into();
        let mut sim = SimBuilder::new(config, drivers)
            .traffic(FixedTraffic { travel: 10, arrivals: 2 })
            .build(&mut rng)
            .unwrap();
        let mut trace = TraceRecorder::new();
        let summary = sim.run(&mut rng, &mut trace);

        let finals: Vec<_> = trace.visits.iter().filter(|v| v.final_stop).collect();
        assert!(finals.len() >= 3);
        assert!(finals.iter().all(|v| v.break_minutes == Some(15)));
        assert!(trace.visits.iter().filter(|v| !v.final_stop).all(|v| v.break_minutes.is_none()));
        assert_eq!(summary.breaks as usize, finals.len());

        // 06:00 stop 0, 06:10 stop 1, 06:20 stop 2 + rest, 06:45 stop 0.
        let times: Vec<SimTime> = trace.visits.iter().take(4).map(|v| v.time).collect();
        assert_eq!(times, vec![at(0, 6, 0), at(0, 6, 10), at(0, 6, 20), at(0, 6, 45)]);
    }

    #[test]
    fn break_end_reported_when_rest_runs_out() {
        let mut rng = SimRng::new(8);
        let config = test_config(3, at(0, 6, 0), at(0, 7, 0));
        let drivers = vec![all_day_rotating(0, None)].into();
        let mut sim = SimBuilder::new(config, drivers)
            .traffic(FixedTraffic { travel: 10, arrivals: 2 })
            .build(&mut rng)
            .unwrap();
        let mut trace = TraceRecorder::new();
        sim.run(&mut rng, &mut trace);

        // Rest starts at 06:20 for 15 minutes; the bus leaves again at 06:45.
        assert_eq!(trace.breaks[0].2, at(0, 6, 20));
        assert_eq!(trace.break_ends[0], (BusId(0), DriverId(0), at(0, 6, 35)));
        assert!(trace.break_ends.len() <= trace.breaks.len());
        assert!(trace.shift_ends.is_empty());
    }

    #[test]
    fn rotating_only_drives_on_cycle_days() {
        let mut rng = SimRng::new(9);
        let config = test_config(4, at(0, 0, 0), at(3, 0, 0));
        let drivers = vec![all_day_rotating(0, Some(SimDate(1)))].into();
        let mut sim = SimBuilder::new(config, drivers).build(&mut rng).unwrap();
        let mut trace = TraceRecorder::new();
        sim.run(&mut rng, &mut trace);
        assert!(!trace.visits.is_empty());
        assert!(trace.visits.iter().all(|v| v.time.date() == SimDate(1)));
    }
}

// ── End-to-end fitness ────────────────────────────────────────────────────────

#[cfg(test)]
mod fitness_tests {
    use super::*;
    use crate::evaluate;

    /// Two buses, two stops, one hour; only bus 0 has a driver on duty.
    fn two_bus_hour() -> (NetworkConfig, ShiftAssignment) {
        let config = test_config(2, at(0, 8, 0), at(0, 9, 0));
        let drivers = vec![regular(0, TimeOfDay::hm(8, 0), TimeOfDay::hm(9, 0)), idle(1)].into();
        (config, drivers)
    }

    #[test]
    fn transported_equals_traced_drop_offs() {
        for seed in 0..10 {
            let mut rng = SimRng::new(seed);
            let (config, drivers) = two_bus_hour();
            let mut sim = SimBuilder::new(config, drivers).build(&mut rng).unwrap();
            let mut trace = TraceRecorder::new();
            let summary = sim.run(&mut rng, &mut trace);
            assert_eq!(summary.transported, trace.dropped_off_total(), "seed {seed}");
            assert_eq!(summary.visits as usize, trace.visits.len());
            assert!(trace.visits_for(BusId(1)).next().is_none());
        }
    }

    #[test]
    fn no_passengers_means_zero_fitness() {
        let mut rng = SimRng::new(10);
        let (config, drivers) = two_bus_hour();
        let mut sim = SimBuilder::new(config, drivers)
            .traffic(FixedTraffic { travel: 11, arrivals: 0 })
            .initial_waiting(vec![0, 0])
            .build(&mut rng)
            .unwrap();
        let mut trace = TraceRecorder::new();
        let summary = sim.run(&mut rng, &mut trace);
        assert!(summary.visits > 0);
        assert_eq!(summary.transported, 0);
        assert_eq!(trace.dropped_off_total(), 0);
    }

    #[test]
    fn evaluate_leaves_assignment_untouched() {
        let mut rng = SimRng::new(11);
        let config = test_config(8, at(0, 7, 0), at(1, 0, 0));
        let drivers: ShiftAssignment = vec![
            regular(0, TimeOfDay::hm(7, 0), TimeOfDay::hm(16, 0)),
            all_day_rotating(1, Some(SimDate(0))),
        ]
        .into();
        let before = drivers.clone();
        let fitness = evaluate(&config, &drivers, sg_core::BandedTraffic, &mut rng).unwrap();
        assert!(fitness > 0);
        assert_eq!(drivers, before);
    }

    #[test]
    fn same_seed_same_fitness() {
        let config = NetworkConfig::default();
        let drivers: ShiftAssignment = (0..8)
            .map(|i| all_day_rotating(i, Some(SimDate(0))))
            .collect::<Vec<_>>()
            .into();
        let a = evaluate(&config, &drivers, sg_core::BandedTraffic, &mut SimRng::new(12)).unwrap();
        let b = evaluate(&config, &drivers, sg_core::BandedTraffic, &mut SimRng::new(12)).unwrap();
        assert_eq!(a, b);
    }
}
