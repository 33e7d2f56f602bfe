use crate::decimal::Money;

use super::Installment;

/// most recently settled installment: a row with money applied (or flagged
/// paid) and a known settlement timestamp; later input position wins on
/// equal timestamps
pub fn locate_last_payment(schedules: &[Installment]) -> Option<&Installment> {
    let mut latest: Option<&Installment> = None;
    for row in schedules {
        if row.paid_at.is_none() {
            continue;
        }
        if row.paid_amount <= Money::ZERO && !row.is_paid {
            continue;
        }
        match latest {
            Some(current) if row.paid_at < current.paid_at => {}
            _ => latest = Some(row),
        }
    }
    latest
}
