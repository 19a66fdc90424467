//! Unit tests for sg-core primitives.

use crate::RandomSource;

/// Scripted source: `range_inclusive` always returns the upper bound,
/// `chance` always succeeds.  Lets band tests observe the range limits.
struct AlwaysHigh;

impl RandomSource for AlwaysHigh {
    fn range_inclusive(&mut self, _lo: u32, hi: u32) -> u32 {
        hi
    }
    fn chance(&mut self, _p: f64) -> bool {
        true
    }
    fn below(&mut self, len: usize) -> usize {
        len - 1
    }
}

#[cfg(test)]
mod ids {
    use crate::{BusId, DriverId, StopId};

    #[test]
    fn index_roundtrip() {
        let id = BusId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(BusId::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn try_from_rejects_overflow() {
        assert!(StopId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(BusId(7).to_string(), "bus-7");
        assert_eq!(DriverId(2).to_string(), "driver-2");
        assert_eq!(StopId(0).to_string(), "stop-0");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimDate, SimTime, TimeOfDay, Weekday, MINUTES_PER_DAY};

    #[test]
    fn epoch_is_monday_midnight() {
        assert_eq!(SimTime::ZERO.weekday(), Weekday::Mon);
        assert_eq!(SimTime::ZERO.time_of_day(), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn date_and_time_of_day_split() {
        let t = SimDate(3).at(TimeOfDay::hm(13, 45));
        assert_eq!(t.date(), SimDate(3));
        assert_eq!(t.weekday(), Weekday::Thu);
        assert_eq!(t.time_of_day(), TimeOfDay::hm(13, 45));
        assert_eq!(t.0, 3 * MINUTES_PER_DAY as u64 + 13 * 60 + 45);
    }

    #[test]
    fn week_wraps_weekday() {
        assert_eq!(SimDate(7).weekday(), Weekday::Mon);
        assert_eq!(SimDate(13).weekday(), Weekday::Sun);
        assert!(SimDate(5).weekday().is_weekend());
    }

    #[test]
    fn weekday_index_out_of_range_is_none() {
        assert_eq!(Weekday::from_index(6), Some(Weekday::Sun));
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn days_since_is_directional() {
        assert_eq!(SimDate(5).days_since(SimDate(2)), Some(3));
        assert_eq!(SimDate(2).days_since(SimDate(5)), None);
    }

    #[test]
    fn time_of_day_validation() {
        assert!(TimeOfDay::new(23, 59).is_ok());
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(10, 60).is_err());
        assert_eq!(TimeOfDay::hm(9, 5).to_string(), "09:05");
    }

    #[test]
    fn checked_add_stops_at_midnight() {
        assert_eq!(
            TimeOfDay::hm(11, 45).checked_add_minutes(12 * 60),
            Some(TimeOfDay::hm(23, 45))
        );
        assert_eq!(TimeOfDay::hm(12, 30).checked_add_minutes(12 * 60), None);
    }

    #[test]
    fn time_arithmetic() {
        let t = SimTime(100);
        assert_eq!(t + 15, SimTime(115));
        assert_eq!(SimTime(115) - t, 15);
        assert_eq!(t.since(SimTime(150)), 0);
    }

    #[test]
    fn clock_steps_until_end() {
        let mut clock = SimClock::new(SimTime(10), SimTime(13));
        let mut steps = 0;
        while !clock.is_finished() {
            clock.advance();
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(clock.elapsed(), 3);
    }

    #[test]
    fn display() {
        let t = SimDate(1).at(TimeOfDay::hm(7, 0));
        assert_eq!(t.to_string(), "day 1 (Tue) 07:00");
    }
}

#[cfg(test)]
mod band {
    use super::AlwaysHigh;
    use crate::{BandedTraffic, SimDate, SimRng, TimeOfDay, TrafficBand, TrafficModel};

    #[test]
    fn band_boundaries() {
        assert_eq!(TrafficBand::of(TimeOfDay::hm(6, 59)), TrafficBand::OffPeak);
        assert_eq!(TrafficBand::of(TimeOfDay::hm(7, 0)), TrafficBand::Peak);
        assert_eq!(TrafficBand::of(TimeOfDay::hm(8, 59)), TrafficBand::Peak);
        assert_eq!(TrafficBand::of(TimeOfDay::hm(9, 0)), TrafficBand::Midday);
        assert_eq!(TrafficBand::of(TimeOfDay::hm(16, 59)), TrafficBand::Midday);
        assert_eq!(TrafficBand::of(TimeOfDay::hm(17, 0)), TrafficBand::Peak);
        assert_eq!(TrafficBand::of(TimeOfDay::hm(19, 0)), TrafficBand::OffPeak);
        assert_eq!(TrafficBand::of(TimeOfDay::MIDNIGHT), TrafficBand::OffPeak);
    }

    #[test]
    fn banded_draws_stay_in_range() {
        let mut rng = SimRng::new(7);
        for hour in 0..24 {
            let now = SimDate(0).at(TimeOfDay::hm(hour, 30));
            let band = TrafficBand::at(now);
            let (tlo, thi) = band.travel_range();
            let (alo, ahi) = band.arrival_range();
            for _ in 0..50 {
                let travel = BandedTraffic.travel_minutes(now, &mut rng);
                let arrivals = BandedTraffic.arrivals(now, &mut rng);
                assert!((tlo..=thi).contains(&travel), "{band}: travel {travel}");
                assert!((alo..=ahi).contains(&arrivals), "{band}: arrivals {arrivals}");
            }
        }
    }

    #[test]
    fn upper_bounds_per_band() {
        let peak = SimDate(0).at(TimeOfDay::hm(8, 0));
        let midday = SimDate(0).at(TimeOfDay::hm(12, 0));
        let night = SimDate(0).at(TimeOfDay::hm(23, 0));
        assert_eq!(BandedTraffic.travel_minutes(peak, &mut AlwaysHigh), 11);
        assert_eq!(BandedTraffic.travel_minutes(midday, &mut AlwaysHigh), 12);
        assert_eq!(BandedTraffic.travel_minutes(night, &mut AlwaysHigh), 13);
        assert_eq!(BandedTraffic.arrivals(peak, &mut AlwaysHigh), 22);
        assert_eq!(BandedTraffic.arrivals(midday, &mut AlwaysHigh), 12);
        assert_eq!(BandedTraffic.arrivals(night, &mut AlwaysHigh), 7);
    }
}

#[cfg(test)]
mod rng {
    use crate::{RandomSource, SimRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..20 {
            assert_eq!(a.range_inclusive(0, 1_000), b.range_inclusive(0, 1_000));
        }
    }

    #[test]
    fn degenerate_range_returns_lower_bound() {
        let mut rng = SimRng::new(1);
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(9, 3), 9);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SimRng::new(3);
        assert!((0..100).all(|_| rng.chance(1.0)));
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(2.5)), "p is clamped to 1");
    }

    #[test]
    fn distinct_pair_never_repeats() {
        let mut rng = SimRng::new(11);
        for _ in 0..500 {
            let (a, b) = rng.distinct_pair(4).unwrap();
            assert_ne!(a, b);
            assert!(a < 4 && b < 4);
        }
        assert_eq!(rng.distinct_pair(1), None);
        assert_eq!(rng.distinct_pair(0), None);
    }

    #[test]
    fn child_streams_differ() {
        let mut root = SimRng::new(5);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        let s1: Vec<u32> = (0..8).map(|_| c1.range_inclusive(0, u32::MAX)).collect();
        let s2: Vec<u32> = (0..8).map(|_| c2.range_inclusive(0, u32::MAX)).collect();
        assert_ne!(s1, s2);
    }
}
