use chrono::NaiveDate;

use crate::schedule::ScheduleEntry;

/// Returns a contiguous, date-ordered slice of `window` entries centered on
/// the installment nearest `target`. Used for compact dashboard previews.
///
/// The input is left untouched; ties on distance go to the earlier entry in
/// sorted order. The result length is `min(window, schedules.len())`.
pub fn closest_window(
    schedules: &[ScheduleEntry],
    target: NaiveDate,
    window: usize,
) -> Vec<ScheduleEntry> {
    if schedules.is_empty() || window == 0 {
        return Vec::new();
    }

    let mut sorted = schedules.to_vec();
    sorted.sort_by_key(|e| e.scheduled_date);

    let mut closest = 0;
    let mut best = i64::MAX;
    for (i, entry) in sorted.iter().enumerate() {
        let diff = (entry.scheduled_date - target).num_days().abs();
        if diff < best {
            best = diff;
            closest = i;
        }
    }

    let mut start = closest.saturating_sub(window / 2);
    let mut end = start + window;
    if end > sorted.len() {
        end = sorted.len();
        start = end.saturating_sub(window);
    }

    sorted[start..end].to_vec()
}
