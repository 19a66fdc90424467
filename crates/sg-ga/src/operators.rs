//! Crossover and mutation on shift assignments.

use sg_core::RandomSource;
use sg_fleet::ShiftAssignment;

use crate::{GaResult, ShiftRules};

/// Single-point crossover at `point`.
///
/// Child A is `p1[..point] ++ p2[point..]`, child B is
/// `p2[..point] ++ p1[point..]`.  Drivers are cloned, so the parents are
/// left intact.
pub fn crossover_at(
    p1:    &ShiftAssignment,
    p2:    &ShiftAssignment,
    point: usize,
) -> (ShiftAssignment, ShiftAssignment) {
    debug_assert_eq!(p1.len(), p2.len(), "parents must have the same slot count");
    let (a_head, a_tail) = p1.drivers().split_at(point);
    let (b_head, b_tail) = p2.drivers().split_at(point);

    let child_a = a_head.iter().chain(b_tail).cloned().collect::<Vec<_>>();
    let child_b = b_head.iter().chain(a_tail).cloned().collect::<Vec<_>>();
    (child_a.into(), child_b.into())
}

/// Single-point crossover with the split drawn uniformly in `[1, len − 1]`.
///
/// Returns both children and the split point.
pub fn crossover<R: RandomSource + ?Sized>(
    p1:  &ShiftAssignment,
    p2:  &ShiftAssignment,
    rng: &mut R,
) -> (ShiftAssignment, ShiftAssignment, usize) {
    let point = rng.range_inclusive(1, p1.len().saturating_sub(1) as u32) as usize;
    let (a, b) = crossover_at(p1, p2, point);
    (a, b, point)
}

/// With probability `rate`, redraw the window of one uniformly chosen driver.
///
/// Returns the mutated slot, if any.  Driver kinds never change.
pub fn mutate<R: RandomSource + ?Sized>(
    assignment: &mut ShiftAssignment,
    rate:       f64,
    rules:      &ShiftRules,
    rng:        &mut R,
) -> GaResult<Option<usize>> {
    if assignment.is_empty() || !rng.chance(rate) {
        return Ok(None);
    }
    let slot = rng.below(assignment.len());
    rules.redraw_window(&mut assignment[slot], rng)?;
    Ok(Some(slot))
}
