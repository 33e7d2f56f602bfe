use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::Installment;
use crate::types::Sale;

/// per-sale balance roll-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleBalances {
    /// sum of every scheduled payment
    pub total_payable: Money,
    /// scheduled settlements plus upfront amounts
    pub total_paid: Money,
    /// remainder owed, floored at zero so over-payment never shows negative debt
    pub outstanding: Money,
}

/// totals over normalized rows plus the sale's upfront amounts
///
/// Runs before payment attribution so settled amounts are counted exactly
/// once. Valid for sales with no schedule rows at all.
pub fn aggregate_balances(sale: &Sale, schedules: &[Installment]) -> SaleBalances {
    let total_payable = schedules
        .iter()
        .map(|s| s.payment)
        .fold(Money::ZERO, |acc, x| acc + x);

    let scheduled_paid = schedules
        .iter()
        .map(|s| s.paid_amount)
        .fold(Money::ZERO, |acc, x| acc + x);

    let total_paid = scheduled_paid + sale.down_payment.max(Money::ZERO) + sale.amount_paid.max(Money::ZERO);
    let outstanding = total_payable.saturating_sub(total_paid);

    SaleBalances {
        total_payable,
        total_paid,
        outstanding,
    }
}
