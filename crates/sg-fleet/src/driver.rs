//! Drivers, their kinds, and the duty state machine.
//!
//! # Kinds
//!
//! - **Regular** — weekday template, at most one 60-minute lunch per
//!   calendar day, taken at the final stop between 13:00 and 15:00.
//! - **Rotating** — daily template, but only on duty every third day from an
//!   optional anchor date.  Takes a 15-minute rest at *every* final-stop
//!   visit.
//!
//! # State
//!
//! [`DutyState`] carries the break start and length as a payload, so a
//! driver can never be "on break" without knowing when the break ends.
//! The Regular once-a-day rule is keyed by the date of the last lunch, which
//! resets it at midnight without a separate flag.

use std::fmt;

use sg_core::{DriverId, SimDate, SimTime, TimeOfDay};

use crate::WeekTemplate;

/// Rotating drivers work one day in this many, counted from their anchor.
pub const ROTATION_PERIOD_DAYS: u32 = 3;

/// Half-open `[start, end)` local-time window in which a Regular driver may
/// start lunch.
pub const LUNCH_WINDOW: (TimeOfDay, TimeOfDay) = (TimeOfDay::hm(13, 0), TimeOfDay::hm(15, 0));

const LUNCH_MINUTES: u32 = 60;
const REST_MINUTES: u32 = 15;

// ── DriverKind ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriverKind {
    Regular,
    Rotating {
        /// First duty day of the 3-day cycle.  `None` disables the cycle
        /// test and the template alone decides.
        anchor: Option<SimDate>,
    },
}

impl DriverKind {
    /// Length of one break for this kind, in minutes.
    pub fn break_minutes(self) -> u32 {
        match self {
            DriverKind::Regular => LUNCH_MINUTES,
            DriverKind::Rotating { .. } => REST_MINUTES,
        }
    }

    pub fn is_regular(self) -> bool {
        matches!(self, DriverKind::Regular)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DriverKind::Regular => "regular",
            DriverKind::Rotating { .. } => "rotating",
        }
    }
}

// ── DutyState ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DutyState {
    #[default]
    OffDuty,
    Working,
    OnBreak {
        started: SimTime,
        minutes: u32,
    },
}

impl DutyState {
    pub fn is_on_break(self) -> bool {
        matches!(self, DutyState::OnBreak { .. })
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    pub id: DriverId,
    kind: DriverKind,
    template: WeekTemplate,
    #[cfg_attr(feature = "serde", serde(skip))]
    state: DutyState,
    #[cfg_attr(feature = "serde", serde(skip))]
    last_lunch: Option<SimDate>,
}

impl Driver {
    pub fn new(id: DriverId, kind: DriverKind, template: WeekTemplate) -> Self {
        Self {
            id,
            kind,
            template,
            state: DutyState::OffDuty,
            last_lunch: None,
        }
    }

    pub fn regular(id: DriverId, template: WeekTemplate) -> Self {
        Self::new(id, DriverKind::Regular, template)
    }

    pub fn rotating(id: DriverId, template: WeekTemplate, anchor: Option<SimDate>) -> Self {
        Self::new(id, DriverKind::Rotating { anchor }, template)
    }

    #[inline]
    pub fn kind(&self) -> DriverKind {
        self.kind
    }

    #[inline]
    pub fn template(&self) -> &WeekTemplate {
        &self.template
    }

    /// Replace the weekly template.  Kind and anchor are untouched.
    pub fn set_template(&mut self, template: WeekTemplate) {
        self.template = template;
    }

    #[inline]
    pub fn state(&self) -> DutyState {
        self.state
    }

    /// Forget all run-time state so the driver can enter a fresh run.
    pub fn reset(&mut self) {
        self.state = DutyState::OffDuty;
        self.last_lunch = None;
    }

    // ── Eligibility ───────────────────────────────────────────────────────

    /// `now` falls inside today's template window.
    pub fn is_scheduled(&self, now: SimTime) -> bool {
        self.template
            .day(now.weekday().index())
            .is_some_and(|w| w.contains(now.time_of_day()))
    }

    /// `date` is a duty day of the rotation (always true for Regular
    /// drivers and for Rotating drivers without an anchor).
    pub fn in_rotation(&self, date: SimDate) -> bool {
        match self.kind {
            DriverKind::Rotating { anchor: Some(anchor) } => date
                .days_since(anchor)
                .is_some_and(|d| d % ROTATION_PERIOD_DAYS == 0),
            _ => true,
        }
    }

    /// Eligible to be on duty at `now`, ignoring breaks.
    pub fn is_eligible(&self, now: SimTime) -> bool {
        self.in_rotation(now.date()) && self.is_scheduled(now)
    }

    pub fn can_drive(&self, now: SimTime) -> bool {
        !self.state.is_on_break() && self.is_eligible(now)
    }

    /// Regular drivers: lunch already taken on `date`.
    pub fn has_taken_break(&self, date: SimDate) -> bool {
        self.last_lunch == Some(date)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Advance the state machine to `now` and report whether the driver may
    /// move the bus this minute.
    ///
    /// A break that runs out this minute ends here, but the bus still waits
    /// until the next minute.
    pub fn tick(&mut self, now: SimTime) -> bool {
        if let DutyState::OnBreak { started, minutes } = self.state {
            if now.since(started) >= minutes as u64 {
                self.state = self.duty_at(now);
            }
            return false;
        }
        self.state = self.duty_at(now);
        self.state == DutyState::Working
    }

    /// Start a break if this kind's rule allows it.  Called on every stop
    /// visit; only final-stop visits can trigger a break.
    ///
    /// Returns the break length in minutes, which the caller adds to the
    /// bus's next departure.
    pub fn try_start_break(&mut self, now: SimTime, at_final_stop: bool) -> Option<u32> {
        if !at_final_stop || self.state.is_on_break() {
            return None;
        }
        match self.kind {
            DriverKind::Regular => {
                let today = now.date();
                let time = now.time_of_day();
                if self.has_taken_break(today) || time < LUNCH_WINDOW.0 || time >= LUNCH_WINDOW.1 {
                    return None;
                }
                self.last_lunch = Some(today);
            }
            DriverKind::Rotating { .. } => {}
        }
        let minutes = self.kind.break_minutes();
        self.state = DutyState::OnBreak { started: now, minutes };
        Some(minutes)
    }

    fn duty_at(&self, now: SimTime) -> DutyState {
        if self.is_eligible(now) {
            DutyState::Working
        } else {
            DutyState::OffDuty
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.kind.as_str(), self.template)?;
        if let DriverKind::Rotating { anchor: Some(anchor) } = self.kind {
            write!(f, ", cycle from {anchor}")?;
        }
        Ok(())
    }
}
