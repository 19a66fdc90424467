//! Weekly shift templates.
//!
//! A `WeekTemplate` holds one optional `ShiftWindow` per weekday.  The
//! fixed-size array makes a template of the wrong length unrepresentable;
//! [`WeekTemplate::from_days`] is the fallible entry point for data that
//! arrives as a list.

use std::fmt;

use sg_core::{CoreError, CoreResult, TimeOfDay, Weekday};

// ── ShiftWindow ───────────────────────────────────────────────────────────────

/// A same-day working window, inclusive at both ends.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "WindowBounds"))]
pub struct ShiftWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl ShiftWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// A window of `hours` starting at `start`.  Fails if it would run past
    /// midnight.
    pub fn starting_at(start: TimeOfDay, hours: u32) -> CoreResult<Self> {
        let end = start.checked_add_minutes(hours * 60).ok_or_else(|| {
            CoreError::Config(format!("a {hours}-hour shift from {start} crosses midnight"))
        })?;
        Self::new(start, end)
    }

    #[inline]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    #[inline]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time <= self.end
    }

    pub fn length_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }
}

/// Unchecked wire form of a [`ShiftWindow`]; deserialized windows go through
/// [`ShiftWindow::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WindowBounds {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[cfg(feature = "serde")]
impl TryFrom<WindowBounds> for ShiftWindow {
    type Error = CoreError;

    fn try_from(bounds: WindowBounds) -> CoreResult<Self> {
        Self::new(bounds.start, bounds.end)
    }
}

impl fmt::Display for ShiftWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

// ── WeekTemplate ──────────────────────────────────────────────────────────────

/// Seven optional windows, Monday first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekTemplate {
    days: [Option<ShiftWindow>; 7],
}

impl WeekTemplate {
    pub fn new(days: [Option<ShiftWindow>; 7]) -> Self {
        Self { days }
    }

    /// Build from a list; anything other than exactly seven entries is an
    /// error.
    pub fn from_days(days: Vec<Option<ShiftWindow>>) -> CoreResult<Self> {
        let len = days.len();
        let days: [Option<ShiftWindow>; 7] =
            days.try_into().map_err(|_| CoreError::TemplateLength(len))?;
        Ok(Self { days })
    }

    /// Never scheduled.
    pub fn off() -> Self {
        Self::default()
    }

    /// `window` Monday to Friday, weekend off.
    pub fn weekdays(window: ShiftWindow) -> Self {
        let mut days = [None; 7];
        for day in Weekday::ALL.iter().filter(|d| !d.is_weekend()) {
            days[day.index()] = Some(window);
        }
        Self { days }
    }

    /// `window` on all seven days.
    pub fn every_day(window: ShiftWindow) -> Self {
        Self { days: [Some(window); 7] }
    }

    /// Window for a raw weekday index.  Indices `>= 7` are "not scheduled".
    #[inline]
    pub fn day(&self, index: usize) -> Option<ShiftWindow> {
        self.days.get(index).copied().flatten()
    }

    #[inline]
    pub fn on(&self, weekday: Weekday) -> Option<ShiftWindow> {
        self.day(weekday.index())
    }

    pub fn days(&self) -> &[Option<ShiftWindow>; 7] {
        &self.days
    }

    pub fn scheduled_days(&self) -> usize {
        self.days.iter().flatten().count()
    }
}

impl fmt::Display for WeekTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in Weekday::ALL {
            if let Some(window) = self.on(day) {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{day} {window}")?;
                first = false;
            }
        }
        if first {
            f.write_str("off")?;
        }
        Ok(())
    }
}
