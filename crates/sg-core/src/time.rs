//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing minute counter, `SimTime`, measured
//! from the simulation epoch.  The epoch is day 0 at 00:00 and day 0 is a
//! Monday, so the calendar needed by shift templates reduces to integer
//! arithmetic:
//!
//!   date        = minutes / 1440
//!   time_of_day = minutes % 1440
//!   weekday     = date % 7          (0 = Monday)
//!
//! Using an integer minute as the canonical unit keeps every schedule
//! comparison exact and avoids pulling in a datetime library for what is a
//! one-week synthetic horizon.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: u32 = 1_440;

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Day of the week.  Index 0 is Monday, matching the template layout.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// `None` for any index outside `0..7`.
    pub fn from_index(index: usize) -> Option<Weekday> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Sat | Weekday::Sun)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimDate ───────────────────────────────────────────────────────────────────

/// A day index counted from the simulation epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDate(pub u32);

impl SimDate {
    #[inline]
    pub fn weekday(self) -> Weekday {
        Weekday::ALL[(self.0 % 7) as usize]
    }

    /// Whole days from `earlier` to `self`, or `None` if `earlier` is later.
    #[inline]
    pub fn days_since(self, earlier: SimDate) -> Option<u32> {
        self.0.checked_sub(earlier.0)
    }

    /// Midnight at the start of this date.
    #[inline]
    pub fn midnight(self) -> SimTime {
        SimTime(self.0 as u64 * MINUTES_PER_DAY as u64)
    }

    #[inline]
    pub fn at(self, time: TimeOfDay) -> SimTime {
        self.midnight() + time.minutes() as u64
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} ({})", self.0, self.weekday())
    }
}

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// Wall-clock time within a day, in minutes since midnight (`0..1440`).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Compile-time constructor for literal clock times.
    ///
    /// # Panics
    /// Panics (at compile time in `const` context) if `hour >= 24` or
    /// `minute >= 60`.
    pub const fn hm(hour: u16, minute: u16) -> TimeOfDay {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        TimeOfDay(hour * 60 + minute)
    }

    /// Fallible constructor for runtime values.
    pub fn new(hour: u16, minute: u16) -> CoreResult<TimeOfDay> {
        if hour >= 24 || minute >= 60 {
            return Err(CoreError::InvalidTime { hour, minute });
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// `self + minutes`, or `None` if the result would cross midnight.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<TimeOfDay> {
        let total = self.0 as u32 + minutes;
        (total < MINUTES_PER_DAY).then_some(TimeOfDay(total as u16))
    }
}

impl TryFrom<u16> for TimeOfDay {
    type Error = CoreError;

    fn try_from(minutes: u16) -> CoreResult<TimeOfDay> {
        TimeOfDay::new(minutes / 60, minutes % 60)
    }
}

impl From<TimeOfDay> for u16 {
    fn from(t: TimeOfDay) -> u16 {
        t.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp in minutes since the epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn date(self) -> SimDate {
        SimDate((self.0 / MINUTES_PER_DAY as u64) as u32)
    }

    #[inline]
    pub fn time_of_day(self) -> TimeOfDay {
        TimeOfDay((self.0 % MINUTES_PER_DAY as u64) as u16)
    }

    #[inline]
    pub fn weekday(self) -> Weekday {
        self.date().weekday()
    }

    /// Minutes elapsed from `earlier` to `self` (0 if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date(), self.time_of_day())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single clock shared by every bus in a run.
///
/// Steps one minute at a time from `start` up to (but excluding) `end`.
#[derive(Clone, Debug)]
pub struct SimClock {
    pub start: SimTime,
    pub end: SimTime,
    /// Advanced by `SimClock::advance()` each iteration.
    pub now: SimTime,
}

impl SimClock {
    pub fn new(start: SimTime, end: SimTime) -> Self {
        Self { start, end, now: start }
    }

    /// Advance the clock by one minute.
    #[inline]
    pub fn advance(&mut self) {
        self.now += 1;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.now >= self.end
    }

    /// Minutes simulated so far.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.now.since(self.start)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} min)", self.now, self.elapsed())
    }
}
