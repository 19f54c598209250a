use super::{Shift, ShiftStatus};

pub const MAX_RELIABILITY_SCORE: i32 = 100;

const COVERING_MARKER: &str = "Covering for";
const LONG_NOTICE_MARKER: &str = ">24h notice";
const SHORT_NOTICE_MARKER: &str = "<24h notice";
const LONG_NOTICE_BONUS: i32 = 10;
const SHORT_NOTICE_BONUS: i32 = 20;

/// Base points for a shift outcome. `None` for shifts that have not
/// happened yet, which take no part in scoring.
pub fn status_points(status: ShiftStatus) -> Option<i32> {
    match status {
        ShiftStatus::Scheduled => None,
        ShiftStatus::Completed => Some(20),
        ShiftStatus::Late => Some(10),
        ShiftStatus::Missed => Some(-50),
        ShiftStatus::Covered => Some(-5),
        ShiftStatus::CoveredLate => Some(-10),
        ShiftStatus::CoveredLastMinute => Some(-20),
    }
}

/// Extra credit for stepping in on someone else's shift, read from the
/// coverage annotation in the notes. Shorter notice earns more.
pub fn coverage_bonus(notes: &str) -> i32 {
    if !notes.contains(COVERING_MARKER) {
        return 0;
    }
    if notes.contains(LONG_NOTICE_MARKER) {
        LONG_NOTICE_BONUS
    } else if notes.contains(SHORT_NOTICE_MARKER) {
        SHORT_NOTICE_BONUS
    } else {
        0
    }
}

pub fn shift_points(shift: &Shift) -> Option<i32> {
    status_points(shift.status).map(|points| points + coverage_bonus(&shift.notes))
}

/// Sum of every resolved shift's contribution, capped at
/// [`MAX_RELIABILITY_SCORE`]. There is no floor.
pub fn reliability_score<'a, I>(shifts: I) -> i32
where
    I: IntoIterator<Item = &'a Shift>,
{
    shifts
        .into_iter()
        .filter_map(shift_points)
        .sum::<i32>()
        .min(MAX_RELIABILITY_SCORE)
}
