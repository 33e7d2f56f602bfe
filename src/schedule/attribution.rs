use crate::decimal::Money;

use super::Installment;

/// attribute upfront credit and per-row excess to unpaid installments,
/// earliest month first
///
/// Upfront amounts (down payment, amount paid at sale time) are collected
/// outside the schedule; here they settle the earliest remainders, the same
/// way a payment waterfall applies available funds in strict priority
/// order. Overpayment sitting on one row is pooled and carried to the next
/// unpaid row, so a sale whose ledger balances to zero reports no remaining
/// obligations.
pub fn apply_upfront_credit(schedules: &mut [Installment], upfront: Money) {
    let mut pool = upfront.max(Money::ZERO);

    // cap overpaid rows at their scheduled amount, pooling the excess
    for row in schedules.iter_mut() {
        if row.paid_amount > row.payment {
            pool += row.paid_amount.saturating_sub(row.payment);
            row.paid_amount = row.payment;
        }
    }

    if pool.is_zero() {
        return;
    }

    let mut order: Vec<usize> = (0..schedules.len()).collect();
    order.sort_by_key(|&i| schedules[i].month);

    for i in order {
        if pool.is_zero() {
            break;
        }

        let row = &mut schedules[i];
        if row.unpaid_amount.is_zero() {
            continue;
        }

        let applied = pool.min(row.unpaid_amount);
        row.paid_amount += applied;
        row.unpaid_amount = row.payment.saturating_sub(row.paid_amount);
        pool = pool.saturating_sub(applied);

        if row.unpaid_amount.is_zero() {
            row.is_paid = true;
            row.is_overdue = false;
            row.days_overdue = 0;
        }
    }
}
