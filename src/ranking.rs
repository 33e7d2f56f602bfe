use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::decimal::Money;
use crate::engine::{EnrichedSale, PortfolioSummary};

/// sentinel month for sales with no remaining obligation, sorts last
const NO_OBLIGATION_MONTH: u32 = u32::MAX;

/// composite comparator for the collections worklist
///
/// Strict key precedence: most days overdue first, then largest
/// outstanding debt, then earliest next obligation month, then oldest
/// sale. One composite function rather than chained sorts, so stability
/// holds across all four keys at once.
pub fn collections_order(a: &EnrichedSale, b: &EnrichedSale) -> Ordering {
    b.max_days_overdue
        .cmp(&a.max_days_overdue)
        .then_with(|| b.outstanding.cmp(&a.outstanding))
        .then_with(|| next_month(a).cmp(&next_month(b)))
        .then_with(|| creation_key(a).cmp(&creation_key(b)))
}

/// rank the worklist in place; sales with identical keys keep input order
pub fn rank_collections(sales: &mut [EnrichedSale]) {
    sales.sort_by(collections_order);
}

/// fold the worklist into a portfolio summary
pub fn summarize(sales: &[EnrichedSale]) -> PortfolioSummary {
    PortfolioSummary {
        total_credit: sales
            .iter()
            .map(|s| s.outstanding)
            .fold(Money::ZERO, |acc, x| acc + x),
        total_transactions: sales.len() as u32,
    }
}

fn next_month(sale: &EnrichedSale) -> u32 {
    sale.next_schedule
        .as_ref()
        .map(|s| s.month)
        .unwrap_or(NO_OBLIGATION_MONTH)
}

/// ascending creation date, unknown dates last
fn creation_key(sale: &EnrichedSale) -> (bool, Option<DateTime<Utc>>) {
    (sale.sale.created_at.is_none(), sale.sale.created_at)
}
