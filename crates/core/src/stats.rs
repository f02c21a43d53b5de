use crate::money::Yen;
use crate::schedule::{ScheduleEntry, ScheduleStatus};

/// Dashboard roll-up of the full schedule list.
#[derive(Debug, Clone, PartialEq)]
pub struct RepaymentSummary {
    pub total_amount: Yen,
    pub completed_amount: Yen,
    pub delayed_amount: Yen,
    pub remaining_amount: Yen,
    pub scheduled_count: usize,
    pub completed_count: usize,
    pub delayed_count: usize,
}

impl RepaymentSummary {
    /// Share of the total already repaid, in [0.0, 1.0]. Zero when the
    /// schedule is empty.
    pub fn repaid_ratio(&self) -> f64 {
        if self.total_amount.is_zero() {
            return 0.0;
        }
        self.completed_amount.amount() as f64 / self.total_amount.amount() as f64
    }

    pub fn total_count(&self) -> usize {
        self.scheduled_count + self.completed_count + self.delayed_count
    }
}

pub fn summarize(schedules: &[ScheduleEntry]) -> RepaymentSummary {
    let mut summary = RepaymentSummary {
        total_amount: Yen::zero(),
        completed_amount: Yen::zero(),
        delayed_amount: Yen::zero(),
        remaining_amount: Yen::zero(),
        scheduled_count: 0,
        completed_count: 0,
        delayed_count: 0,
    };

    for entry in schedules {
        summary.total_amount = summary.total_amount + entry.amount;
        match entry.status {
            ScheduleStatus::Scheduled => summary.scheduled_count += 1,
            ScheduleStatus::Completed => {
                summary.completed_count += 1;
                summary.completed_amount = summary.completed_amount + entry.amount;
            }
            ScheduleStatus::Delayed => {
                summary.delayed_count += 1;
                summary.delayed_amount = summary.delayed_amount + entry.amount;
            }
        }
    }

    summary.remaining_amount = summary.total_amount - summary.completed_amount;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::PaymentCategory;
    use chrono::NaiveDate;

    fn entry(amount: i64, status: ScheduleStatus) -> ScheduleEntry {
        ScheduleEntry {
            id: "x".into(),
            amount: Yen::new(amount),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            paid_date: None,
            status,
            payment_method: None,
            payment_category: PaymentCategory::Normal,
        }
    }

    #[test]
    fn summarize_counts_and_totals() {
        let schedules = vec![
            entry(15_000, ScheduleStatus::Completed),
            entry(15_000, ScheduleStatus::Completed),
            entry(15_000, ScheduleStatus::Delayed),
            entry(15_000, ScheduleStatus::Scheduled),
        ];
        let s = summarize(&schedules);
        assert_eq!(s.total_amount, Yen::new(60_000));
        assert_eq!(s.completed_amount, Yen::new(30_000));
        assert_eq!(s.delayed_amount, Yen::new(15_000));
        assert_eq!(s.remaining_amount, Yen::new(30_000));
        assert_eq!(s.completed_count, 2);
        assert_eq!(s.delayed_count, 1);
        assert_eq!(s.scheduled_count, 1);
        assert_eq!(s.total_count(), 4);
        assert!((s.repaid_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_schedule_has_zero_ratio() {
        let s = summarize(&[]);
        assert_eq!(s.total_amount, Yen::zero());
        assert_eq!(s.repaid_ratio(), 0.0);
    }
}
