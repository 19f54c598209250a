use super::{
    clock_time, reliability, streak, MalformedTime, Shift, ShiftId, VolunteerStats,
};

/// Outcome of one full pass over a volunteer's shift history.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub stats: VolunteerStats,
    /// Worked shifts whose times could not be read and so added no hours.
    pub malformed: Vec<(ShiftId, MalformedTime)>,
}

/// Derives the volunteer aggregate from the complete shift set. The result
/// depends only on the shifts passed in, never on a previous aggregate.
pub fn compute_stats(shifts: &[Shift]) -> StatsReport {
    let resolved: Vec<&Shift> = shifts
        .iter()
        .filter(|shift| shift.status.is_resolved())
        .collect();

    let mut minutes = 0;
    let mut malformed = Vec::new();
    for shift in resolved.iter().filter(|s| s.status.counts_toward_hours()) {
        match clock_time::try_duration_minutes(&shift.start_time, &shift.end_time) {
            Ok(duration) => minutes += duration,
            Err(e) => malformed.push((shift.id, e)),
        }
    }

    let stats = VolunteerStats {
        reliability_score: reliability::reliability_score(resolved.iter().copied()),
        // Whole hours only; the fractional remainder is dropped.
        total_hours: (minutes / 60) as i32,
        streak: streak::current_streak(resolved.iter().copied()),
    };

    StatsReport { stats, malformed }
}
