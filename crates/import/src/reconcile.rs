use chrono::{Datelike, NaiveDate};

use hensai_core::{PaymentCategory, PaymentMethod, RepaymentUpdate, ScheduleEntry, ScheduleStatus};

use crate::csv::BankTransaction;

/// Matches statement transactions against the expected schedule and derives
/// status transitions. Only entries whose status changes are emitted; the
/// caller applies them (and submits them upstream) as it sees fit.
///
/// A transaction pays an installment when its amount equals the expected
/// amount and it landed in the installment's due month. Each transaction is
/// consumed by at most one installment, first match in statement order.
/// `Delayed` entries are re-evaluated, so a late deposit still completes
/// them; an unmatched `Scheduled` entry past its due date becomes `Delayed`.
pub fn reconcile(
    transactions: &[BankTransaction],
    schedules: &[ScheduleEntry],
    today: NaiveDate,
) -> Vec<RepaymentUpdate> {
    let mut consumed = vec![false; transactions.len()];
    let mut updates = Vec::new();

    for entry in schedules {
        if entry.status == ScheduleStatus::Completed {
            continue;
        }

        let matched = transactions.iter().enumerate().find(|(i, tx)| {
            !consumed[*i]
                && tx.credit == entry.amount
                && tx.paid_date.year() == entry.scheduled_date.year()
                && tx.paid_date.month() == entry.scheduled_date.month()
        });

        if let Some((i, tx)) = matched {
            consumed[i] = true;
            updates.push(transition(entry, ScheduleStatus::Completed, Some(tx.paid_date)));
        } else if entry.status == ScheduleStatus::Scheduled
            && entry.scheduled_date < today
            && entry.paid_date.is_none()
        {
            updates.push(transition(entry, ScheduleStatus::Delayed, None));
        }
    }

    updates
}

fn transition(
    entry: &ScheduleEntry,
    status: ScheduleStatus,
    paid_date: Option<NaiveDate>,
) -> RepaymentUpdate {
    RepaymentUpdate {
        id: entry.id.clone(),
        amount: entry.amount,
        scheduled_date: entry.scheduled_date,
        paid_date,
        status,
        before_status: entry.status,
        // A statement row is by definition a bank transfer, and CSV
        // reconciliation only covers ordinary installments.
        payment_method: PaymentMethod::BankTransfer,
        payment_category: PaymentCategory::Normal,
        has_csv_update: true,
    }
}
