//! GA and shift-generation configuration.

use sg_core::MINUTES_PER_DAY;

use crate::{GaError, GaResult};

// ── ShiftRules ────────────────────────────────────────────────────────────────

/// How random shift templates are drawn.
///
/// Start times are `hour:minute` with the hour uniform in the configured
/// inclusive range and the minute uniform on the `start_grid_minutes` grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShiftRules {
    /// Inclusive start-hour range for Regular drivers.
    pub regular_start_hours: (u16, u16),
    /// Length of a Regular shift (Mon–Fri).
    pub regular_shift_hours: u32,
    /// Inclusive start-hour range for Rotating drivers.
    pub rotating_start_hours: (u16, u16),
    /// Length of a Rotating shift (every day).
    pub rotating_shift_hours: u32,
    /// Minute granularity of start times.  Must divide 60.
    pub start_grid_minutes: u16,
    /// Inclusive range of day indices a Rotating anchor is drawn from.
    pub anchor_days: (u32, u32),
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self {
            regular_start_hours:  (7, 12),
            regular_shift_hours:  9,
            rotating_start_hours: (0, 11),
            rotating_shift_hours: 12,
            start_grid_minutes:   15,
            anchor_days:          (0, 7),
        }
    }
}

impl ShiftRules {
    pub fn validate(&self) -> GaResult<()> {
        if self.start_grid_minutes == 0 || 60 % self.start_grid_minutes != 0 {
            return Err(GaError::Config(format!(
                "start grid of {} minutes does not divide an hour",
                self.start_grid_minutes
            )));
        }
        if self.anchor_days.0 > self.anchor_days.1 {
            return Err(GaError::Config("anchor day range is inverted".into()));
        }
        for (what, (lo, hi), hours) in [
            ("regular", self.regular_start_hours, self.regular_shift_hours),
            ("rotating", self.rotating_start_hours, self.rotating_shift_hours),
        ] {
            if lo > hi || hi >= 24 {
                return Err(GaError::Config(format!("{what} start hours {lo}..={hi} are invalid")));
            }
            let latest_start = hi as u32 * 60 + (60 - self.start_grid_minutes as u32);
            let latest_end = hours
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_add(latest_start));
            if latest_end.is_none_or(|end| end >= MINUTES_PER_DAY) {
                return Err(GaError::Config(format!(
                    "{what} shifts of {hours} h starting as late as {hi}:xx cross midnight"
                )));
            }
        }
        Ok(())
    }

    /// Number of distinct start times the grid allows for an hour range.
    pub fn start_choices(&self, hours: (u16, u16)) -> usize {
        let per_hour = (60 / self.start_grid_minutes.max(1)) as usize;
        (hours.1.saturating_sub(hours.0) as usize + 1) * per_hour
    }
}

// ── GaConfig ──────────────────────────────────────────────────────────────────

/// Top-level search configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Individuals per generation.  The top half survives, so at least 4
    /// are needed to have two parents to choose from.
    pub population_size: usize,

    pub generations: usize,

    /// Probability that an offspring has one driver's window redrawn.
    pub mutation_rate: f64,

    /// Bus slots per assignment (one driver each).
    pub slots: usize,

    /// Simulation runs averaged per fitness call.  1 keeps the single noisy
    /// draw; larger values trade time for a steadier ranking.
    pub samples_per_evaluation: u32,

    pub rules: ShiftRules,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size:        100,
            generations:            100,
            mutation_rate:          0.1,
            slots:                  8,
            samples_per_evaluation: 1,
            rules:                  ShiftRules::default(),
        }
    }
}

impl GaConfig {
    /// Size of the surviving top half.
    #[inline]
    pub fn retained(&self) -> usize {
        self.population_size / 2
    }

    /// Reject configurations the generational loop cannot run.
    pub fn validate(&self) -> GaResult<()> {
        if self.retained() < 2 {
            return Err(GaError::PoolTooSmall(self.retained()));
        }
        if self.slots < 2 {
            return Err(GaError::Config(format!(
                "crossover needs at least 2 slots, got {}",
                self.slots
            )));
        }
        if self.slots > u16::MAX as usize {
            return Err(GaError::Config(format!("{} slots exceed the id range", self.slots)));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::Config(format!(
                "mutation_rate {} is not a probability",
                self.mutation_rate
            )));
        }
        if self.samples_per_evaluation == 0 {
            return Err(GaError::Config("samples_per_evaluation must be at least 1".into()));
        }
        self.rules.validate()
    }
}
