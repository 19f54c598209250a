use std::cmp::Reverse;

use super::{clock_time, Shift, ShiftStatus};

/// Resolved shifts ordered most recent first: date descending, then start
/// time descending. Unparseable start times count as midnight.
pub fn most_recent_first<'a, I>(shifts: I) -> Vec<&'a Shift>
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut resolved: Vec<&Shift> = shifts
        .into_iter()
        .filter(|shift| shift.status.is_resolved())
        .collect();
    resolved.sort_by_key(|shift| {
        Reverse((shift.date, clock_time::sort_time(&shift.start_time)))
    });
    resolved
}

/// Number of consecutive completed shifts counting back from the most
/// recent one. Anything other than a completed shift ends the run, late
/// arrivals and coverage included.
pub fn current_streak<'a, I>(shifts: I) -> i32
where
    I: IntoIterator<Item = &'a Shift>,
{
    most_recent_first(shifts)
        .into_iter()
        .take_while(|shift| shift.status == ShiftStatus::Completed)
        .count() as i32
}
