use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// payment type recorded on a sale by the transaction store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Cash,
    Credit,
    Installment,
    Transfer,
    /// unrecognized type, never reconciled
    #[default]
    #[serde(other)]
    Other,
}

impl PaymentType {
    /// whether sales of this type carry an installment ledger
    pub fn is_credit(&self) -> bool {
        matches!(self, PaymentType::Credit | PaymentType::Installment)
    }
}

/// one raw schedule row after boundary validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month offset from the sale's creation date
    pub month: u32,
    /// amount owed this installment
    pub payment: Money,
    /// amount settled so far
    pub paid_amount: Money,
    /// explicit settled flag from the store, if recorded
    pub is_paid: Option<bool>,
    /// settlement timestamp, if recorded
    pub paid_at: Option<DateTime<Utc>>,
    /// identity of the person who recorded the payment
    pub paid_by: Option<String>,
}

/// sale record as received from the external transaction store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// external identifier, passed through unchanged
    pub id: String,
    pub payment_type: PaymentType,
    /// unknown creation dates leave every installment without a due date
    pub created_at: Option<DateTime<Utc>>,
    /// down payment collected at sale time, outside the schedule
    pub down_payment: Money,
    /// additional upfront amount collected outside the schedule
    pub amount_paid: Money,
    pub schedules: Vec<ScheduleEntry>,
    pub branch: Option<String>,
    /// customer reference, opaque to the engine
    pub customer: Option<serde_json::Value>,
}
