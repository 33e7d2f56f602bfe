use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{PaymentType, Sale, ScheduleEntry};

/// wire shape of one sale, before validation
///
/// The store's documents are loosely typed: numbers arrive as strings,
/// optional fields come and go, and a single bad value must not hide the
/// sale's obligations. Every numeric field coerces rather than fails.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSale {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_payment_type")]
    pub payment_type: PaymentType,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_money")]
    pub down_payment: Money,
    #[serde(default, deserialize_with = "lenient_money")]
    pub amount_paid: Money,
    #[serde(default)]
    pub payment_schedules: Vec<RawScheduleEntry>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub customer: Option<Value>,
}

/// wire shape of one schedule row, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleEntry {
    #[serde(default, deserialize_with = "lenient_month")]
    pub month: u32,
    #[serde(default, deserialize_with = "lenient_money")]
    pub payment: Money,
    #[serde(default, deserialize_with = "lenient_money")]
    pub paid_amount: Money,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_paid: Option<bool>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_by: Option<String>,
}

impl RawSale {
    /// validated, strongly typed sale
    pub fn into_sale(self) -> Sale {
        Sale {
            id: self.id,
            payment_type: self.payment_type,
            created_at: self.created_at,
            down_payment: self.down_payment,
            amount_paid: self.amount_paid,
            schedules: self
                .payment_schedules
                .into_iter()
                .map(RawScheduleEntry::into_entry)
                .collect(),
            branch: self.branch,
            customer: self.customer,
        }
    }
}

impl RawScheduleEntry {
    pub fn into_entry(self) -> ScheduleEntry {
        ScheduleEntry {
            month: self.month,
            payment: self.payment,
            paid_amount: self.paid_amount,
            is_paid: self.is_paid,
            paid_at: self.paid_at,
            paid_by: self.paid_by,
        }
    }
}

/// parse a snapshot array of sale documents
///
/// A structurally invalid document is the only hard error; damage inside a
/// sale degrades that sale's fields and keeps the batch.
pub fn sales_from_json(json: &str) -> Result<Vec<Sale>> {
    let raw: Vec<RawSale> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(RawSale::into_sale).collect())
}

fn lenient_money<'de, D>(deserializer: D) -> std::result::Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_money(&value))
}

fn coerce_money(value: &Value) -> Money {
    match value {
        Value::Null => Money::ZERO,
        Value::Number(n) => parse_decimal(&n.to_string()).map(Money::from_decimal).unwrap_or_else(|| {
            warn!(value = %n, "malformed numeric field coerced to zero");
            Money::ZERO
        }),
        Value::String(s) => parse_decimal(s.trim()).map(Money::from_decimal).unwrap_or_else(|| {
            warn!(value = %s, "malformed numeric field coerced to zero");
            Money::ZERO
        }),
        other => {
            warn!(value = %other, "non-numeric field coerced to zero");
            Money::ZERO
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn lenient_month<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Null => 0,
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|v| v.min(u32::MAX as u64) as u32)
            .unwrap_or_else(|| {
                warn!(value = %n, "malformed month coerced to zero");
                0
            }),
        Value::String(s) => s.trim().parse().unwrap_or_else(|_| {
            warn!(value = %s, "malformed month coerced to zero");
            0
        }),
        other => {
            warn!(value = %other, "non-numeric month coerced to zero");
            0
        }
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
        other => {
            warn!(value = %other, "non-boolean paid flag ignored");
            None
        }
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_timestamp(&value))
}

fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Null => None,
        Value::String(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(_) => {
                warn!(value = %s, "unparseable timestamp treated as unknown");
                None
            }
        },
        // epoch milliseconds
        Value::Number(n) => match n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
            Some(dt) => Some(dt),
            None => {
                warn!(value = %n, "unparseable timestamp treated as unknown");
                None
            }
        },
        other => {
            warn!(value = %other, "unparseable timestamp treated as unknown");
            None
        }
    }
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_payment_type<'de, D>(deserializer: D) -> std::result::Result<PaymentType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::String(_) => serde_json::from_value(value).unwrap_or(PaymentType::Other),
        Value::Null => PaymentType::Other,
        other => {
            warn!(value = %other, "unrecognized payment type");
            PaymentType::Other
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_numeric_strings_parse() {
        let json = r#"[{
            "id": "trx-1",
            "paymentType": "CREDIT",
            "downPayment": "50000",
            "paymentSchedules": [
                {"month": "1", "payment": "100000", "paidAmount": "25000.50"}
            ]
        }]"#;

        let sales = sales_from_json(json).unwrap();
        assert_eq!(sales[0].down_payment, Money::from_major(50_000));
        assert_eq!(sales[0].schedules[0].month, 1);
        assert_eq!(sales[0].schedules[0].payment, Money::from_major(100_000));
        assert_eq!(
            sales[0].schedules[0].paid_amount,
            Money::from_decimal(dec!(25000.50))
        );
    }

    #[test]
    fn test_garbage_numerics_coerce_to_zero() {
        let json = r#"[{
            "id": "trx-2",
            "paymentType": "INSTALLMENT",
            "downPayment": "abc",
            "amountPaid": {"nested": true},
            "paymentSchedules": [
                {"month": 1, "payment": "oops", "paidAmount": null}
            ]
        }]"#;

        let sales = sales_from_json(json).unwrap();
        assert_eq!(sales[0].down_payment, Money::ZERO);
        assert_eq!(sales[0].amount_paid, Money::ZERO);
        assert_eq!(sales[0].schedules[0].payment, Money::ZERO);
        assert_eq!(sales[0].schedules[0].paid_amount, Money::ZERO);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let json = r#"[{"id": "trx-3", "paymentType": "CREDIT"}]"#;

        let sales = sales_from_json(json).unwrap();
        assert!(sales[0].schedules.is_empty());
        assert_eq!(sales[0].down_payment, Money::ZERO);
        assert_eq!(sales[0].amount_paid, Money::ZERO);
        assert!(sales[0].created_at.is_none());
        assert!(sales[0].branch.is_none());
    }

    #[test]
    fn test_unknown_payment_type_lands_in_other() {
        let json = r#"[
            {"id": "a", "paymentType": "VOUCHER"},
            {"id": "b", "paymentType": 7}
        ]"#;

        let sales = sales_from_json(json).unwrap();
        assert_eq!(sales[0].payment_type, PaymentType::Other);
        assert_eq!(sales[1].payment_type, PaymentType::Other);
    }

    #[test]
    fn test_timestamps_accept_rfc3339_and_epoch_millis() {
        let json = r#"[{
            "id": "trx-4",
            "paymentType": "CREDIT",
            "createdAt": "2024-06-01T00:00:00Z",
            "paymentSchedules": [
                {"month": 1, "payment": 100000, "paidAmount": 100000, "paidAt": 1719792000000}
            ]
        }]"#;

        let sales = sales_from_json(json).unwrap();
        assert_eq!(
            sales[0].created_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            sales[0].schedules[0].paid_at,
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_timestamp_is_unknown() {
        let json = r#"[{"id": "trx-5", "paymentType": "CREDIT", "createdAt": "yesterday"}]"#;

        let sales = sales_from_json(json).unwrap();
        assert!(sales[0].created_at.is_none());
    }

    #[test]
    fn test_truthy_numeric_paid_flag() {
        let json = r#"[{
            "id": "trx-6",
            "paymentType": "CREDIT",
            "paymentSchedules": [
                {"month": 1, "payment": 100000, "paidAmount": 0, "isPaid": 1},
                {"month": 2, "payment": 100000, "paidAmount": 0, "isPaid": 0}
            ]
        }]"#;

        let sales = sales_from_json(json).unwrap();
        assert_eq!(sales[0].schedules[0].is_paid, Some(true));
        assert_eq!(sales[0].schedules[1].is_paid, Some(false));
    }

    #[test]
    fn test_numeric_id_passes_through_as_text() {
        let json = r#"[{"id": 4821, "paymentType": "CREDIT"}]"#;

        let sales = sales_from_json(json).unwrap();
        assert_eq!(sales[0].id, "4821");
    }

    #[test]
    fn test_structurally_invalid_document_is_a_hard_error() {
        assert!(sales_from_json("{not json").is_err());
        assert!(sales_from_json(r#"{"not": "an array"}"#).is_err());
    }
}
