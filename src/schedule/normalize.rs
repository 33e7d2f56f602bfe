use chrono::{DateTime, Months, Utc};

use crate::decimal::Money;
use crate::types::ScheduleEntry;

use super::Installment;

/// convert raw schedule rows into dated installments, judged against `now`
///
/// The instant is captured once by the caller and reused for every row, so
/// two installments in the same run are never judged against different
/// clocks. A sale without a creation date yields undated installments that
/// can never be overdue.
pub fn normalize_schedules(
    entries: &[ScheduleEntry],
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<Installment> {
    entries
        .iter()
        .map(|entry| normalize_entry(entry, created_at, now))
        .collect()
}

fn normalize_entry(
    entry: &ScheduleEntry,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Installment {
    let payment = entry.payment.max(Money::ZERO);
    let paid_amount = entry.paid_amount.max(Money::ZERO);
    let unpaid_amount = payment.saturating_sub(paid_amount);
    let is_paid = entry.is_paid.unwrap_or(false) || unpaid_amount.is_zero();
    let due_date = due_date(created_at, entry.month);

    let (is_overdue, days_overdue) = match due_date {
        Some(due) if !unpaid_amount.is_zero() && !is_paid && due < now => {
            // whole days, truncated
            (true, (now - due).num_days().max(0) as u32)
        }
        _ => (false, 0),
    };

    Installment {
        month: entry.month,
        due_date,
        payment,
        paid_amount,
        unpaid_amount,
        is_paid,
        is_overdue,
        days_overdue,
        paid_at: entry.paid_at,
        paid_by: entry.paid_by.clone(),
    }
}

/// due date for a 1-based month offset; None when the creation date is
/// unknown or the offset overflows the calendar
fn due_date(created_at: Option<DateTime<Utc>>, month: u32) -> Option<DateTime<Utc>> {
    created_at.and_then(|created| created.checked_add_months(Months::new(month)))
}
