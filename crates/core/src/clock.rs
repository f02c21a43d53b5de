use chrono::NaiveDate;

/// Source of "today" for period filtering and delay detection.
/// Everything date-sensitive takes a `Clock` so tests can pin time.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock calendar date in the local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Pinned date, for tests and replays.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(FixedClock(d).today(), d);
    }

    #[test]
    fn system_clock_is_usable_through_the_trait() {
        let clock: &dyn Clock = &SystemClock;
        // No fixed expectation possible; just exercise the call path.
        let _ = clock.today();
    }
}
