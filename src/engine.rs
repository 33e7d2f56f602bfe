use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance::aggregate_balances;
use crate::decimal::Money;
use crate::ranking;
use crate::schedule::{self, Installment};
use crate::types::Sale;

/// reconciliation options, threaded explicitly so the engine has no hidden inputs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// restrict the worklist to sales recorded at one branch
    pub branch_filter: Option<String>,
}

/// per-sale financial truth, rebuilt from the sale on every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSale {
    /// the source record, passed through unchanged
    pub sale: Sale,
    /// dated installments after payment attribution
    pub schedules: Vec<Installment>,
    /// rows still carrying an unpaid remainder
    pub unpaid_schedules: Vec<Installment>,
    /// earliest unpaid installment, none once the ledger balances
    pub next_schedule: Option<Installment>,
    /// highest month across the schedule, paid or not
    pub months_taken: u32,
    /// count of unpaid rows
    pub months_remaining: u32,
    pub total_payable: Money,
    pub total_paid: Money,
    pub outstanding: Money,
    /// worst overdue position across unpaid rows
    pub max_days_overdue: u32,
    /// payer of the most recent settled installment
    pub last_paid_by: Option<String>,
}

/// portfolio roll-up over the ranked worklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_credit: Money,
    pub total_transactions: u32,
}

/// stateless reconciliation engine
///
/// Each invocation is an independent pure transform over a snapshot of
/// sales: no shared mutable state, no I/O, nothing cached between runs.
/// Callers may reconcile different snapshots concurrently.
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// reconcile a snapshot, capturing `now` once so every installment in
    /// the run is judged against the same instant
    pub fn reconcile(
        &self,
        sales: &[Sale],
        time_provider: &SafeTimeProvider,
    ) -> (Vec<EnrichedSale>, PortfolioSummary) {
        self.reconcile_at(sales, time_provider.now())
    }

    /// reconcile against an explicit instant
    pub fn reconcile_at(
        &self,
        sales: &[Sale],
        now: DateTime<Utc>,
    ) -> (Vec<EnrichedSale>, PortfolioSummary) {
        let mut worklist: Vec<EnrichedSale> = sales
            .iter()
            .filter(|sale| sale.payment_type.is_credit())
            .filter(|sale| self.matches_branch(sale))
            .map(|sale| enrich_sale(sale, now))
            .collect();

        ranking::rank_collections(&mut worklist);
        let summary = ranking::summarize(&worklist);

        debug!(
            input = sales.len(),
            ranked = worklist.len(),
            total_credit = %summary.total_credit,
            "reconciled sales snapshot"
        );

        (worklist, summary)
    }

    fn matches_branch(&self, sale: &Sale) -> bool {
        match &self.config.branch_filter {
            Some(branch) => sale.branch.as_deref() == Some(branch.as_str()),
            None => true,
        }
    }
}

/// derive every facet of one sale against the captured instant
pub fn enrich_sale(sale: &Sale, now: DateTime<Utc>) -> EnrichedSale {
    let mut schedules = schedule::normalize_schedules(&sale.schedules, sale.created_at, now);

    // totals come from the raw settlements; attribution only re-spreads them
    let balances = aggregate_balances(sale, &schedules);
    let upfront = sale.down_payment.max(Money::ZERO) + sale.amount_paid.max(Money::ZERO);
    schedule::apply_upfront_credit(&mut schedules, upfront);

    let unpaid_schedules = schedule::unpaid_schedules(&schedules);
    let next_schedule = schedule::next_obligation(&schedules).cloned();
    let months_taken = schedule::months_taken(&schedules);
    let months_remaining = schedule::months_remaining(&schedules);
    let max_days_overdue = schedule::max_days_overdue(&schedules);
    let last_paid_by = schedule::locate_last_payment(&schedules).and_then(|s| s.paid_by.clone());

    EnrichedSale {
        sale: sale.clone(),
        schedules,
        unpaid_schedules,
        next_schedule,
        months_taken,
        months_remaining,
        total_payable: balances.total_payable,
        total_paid: balances.total_paid,
        outstanding: balances.outstanding,
        max_days_overdue,
        last_paid_by,
    }
}
