pub mod attribution;
pub mod last_payment;
pub mod normalize;
pub mod obligation;
pub mod overdue;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

pub use attribution::apply_upfront_credit;
pub use last_payment::locate_last_payment;
pub use normalize::normalize_schedules;
pub use obligation::{months_remaining, months_taken, next_obligation};
pub use overdue::max_days_overdue;

/// one dated installment derived from a raw schedule row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based month offset from the sale's creation date
    pub month: u32,
    /// creation date plus `month` calendar months; unknown without a creation date
    pub due_date: Option<DateTime<Utc>>,
    /// amount owed this installment
    pub payment: Money,
    /// amount settled against this installment
    pub paid_amount: Money,
    /// remainder still owed, floored at zero
    pub unpaid_amount: Money,
    /// explicitly flagged paid or nothing left to pay
    pub is_paid: bool,
    /// unpaid with a known due date in the past
    pub is_overdue: bool,
    /// whole days past due, 0 unless overdue
    pub days_overdue: u32,
    pub paid_at: Option<DateTime<Utc>>,
    pub paid_by: Option<String>,
}

/// filtered subsequence of rows still carrying an unpaid remainder
pub fn unpaid_schedules(schedules: &[Installment]) -> Vec<Installment> {
    schedules
        .iter()
        .filter(|s| !s.unpaid_amount.is_zero())
        .cloned()
        .collect()
}
