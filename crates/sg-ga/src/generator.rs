//! Random shift templates and assignments.
//!
//! Draw order matters for seeded runs and is fixed: the Regular count first,
//! then each Regular driver (hour, minute), then each Rotating driver (hour,
//! minute, anchor day).

use sg_core::{DriverId, RandomSource, SimDate, TimeOfDay};
use sg_fleet::{Driver, DriverKind, ShiftAssignment, ShiftWindow, WeekTemplate};

use crate::{GaConfig, GaResult, ShiftRules};

impl ShiftRules {
    /// A start time with the hour uniform in `hours` and the minute on the
    /// grid.
    pub fn random_start<R: RandomSource + ?Sized>(
        &self,
        hours: (u16, u16),
        rng: &mut R,
    ) -> GaResult<TimeOfDay> {
        let hour = rng.range_inclusive(hours.0 as u32, hours.1 as u32) as u16;
        let slots_per_hour = 60 / self.start_grid_minutes as usize;
        let minute = rng.below(slots_per_hour) as u16 * self.start_grid_minutes;
        Ok(TimeOfDay::new(hour, minute)?)
    }

    /// Mon–Fri, identical window, weekend off.
    pub fn regular_template<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> GaResult<WeekTemplate> {
        let start = self.random_start(self.regular_start_hours, rng)?;
        let window = ShiftWindow::starting_at(start, self.regular_shift_hours)?;
        Ok(WeekTemplate::weekdays(window))
    }

    /// All seven days, identical window.
    pub fn rotating_template<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> GaResult<WeekTemplate> {
        let start = self.random_start(self.rotating_start_hours, rng)?;
        let window = ShiftWindow::starting_at(start, self.rotating_shift_hours)?;
        Ok(WeekTemplate::every_day(window))
    }

    pub fn random_anchor<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SimDate {
        SimDate(rng.range_inclusive(self.anchor_days.0, self.anchor_days.1))
    }

    /// Template drawn with the rule for `kind`.
    pub fn template_for<R: RandomSource + ?Sized>(
        &self,
        kind: DriverKind,
        rng: &mut R,
    ) -> GaResult<WeekTemplate> {
        match kind {
            DriverKind::Regular => self.regular_template(rng),
            DriverKind::Rotating { .. } => self.rotating_template(rng),
        }
    }

    fn window_choices(&self, kind: DriverKind) -> usize {
        match kind {
            DriverKind::Regular => self.start_choices(self.regular_start_hours),
            DriverKind::Rotating { .. } => self.start_choices(self.rotating_start_hours),
        }
    }

    /// Give `driver` a new window drawn with its kind's rule.  Kind and
    /// anchor stay.
    ///
    /// Draws until the template actually changes, unless the rule admits only
    /// one window.
    pub fn redraw_window<R: RandomSource + ?Sized>(
        &self,
        driver: &mut Driver,
        rng: &mut R,
    ) -> GaResult<()> {
        let current = *driver.template();
        let single_choice = self.window_choices(driver.kind()) <= 1;
        loop {
            let template = self.template_for(driver.kind(), rng)?;
            if template != current || single_choice {
                driver.set_template(template);
                return Ok(());
            }
        }
    }
}

/// A random assignment: Regular count uniform in `[0, slots − 1]`, Regular
/// drivers in the first slots, Rotating drivers after them.
pub fn random_assignment<R: RandomSource + ?Sized>(
    config: &GaConfig,
    rng: &mut R,
) -> GaResult<ShiftAssignment> {
    let rules = &config.rules;
    let regular_count = rng.range_inclusive(0, config.slots as u32 - 1) as usize;

    let mut drivers = Vec::with_capacity(config.slots);
    for slot in 0..regular_count {
        let template = rules.regular_template(rng)?;
        drivers.push(Driver::regular(DriverId(slot as u16), template));
    }
    for slot in regular_count..config.slots {
        let template = rules.rotating_template(rng)?;
        let anchor = rules.random_anchor(rng);
        drivers.push(Driver::rotating(DriverId(slot as u16), template, Some(anchor)));
    }
    Ok(ShiftAssignment::new(drivers))
}
