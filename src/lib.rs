pub mod balance;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod ingest;
pub mod ranking;
pub mod schedule;
pub mod types;

// re-export key types
pub use balance::{aggregate_balances, SaleBalances};
pub use decimal::Money;
pub use engine::{enrich_sale, EnrichedSale, PortfolioSummary, ReconcileConfig, Reconciler};
pub use errors::{LedgerError, Result};
pub use ingest::{sales_from_json, RawSale, RawScheduleEntry};
pub use ranking::{collections_order, rank_collections, summarize};
pub use schedule::{
    apply_upfront_credit, locate_last_payment, max_days_overdue, months_remaining, months_taken,
    next_obligation, normalize_schedules, unpaid_schedules, Installment,
};
pub use types::{PaymentType, Sale, ScheduleEntry};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
