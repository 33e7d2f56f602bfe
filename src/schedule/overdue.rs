use super::Installment;

/// maximum days overdue across rows still carrying an unpaid remainder,
/// 0 when nothing is overdue
pub fn max_days_overdue(schedules: &[Installment]) -> u32 {
    schedules
        .iter()
        .filter(|s| !s.unpaid_amount.is_zero() && s.is_overdue)
        .map(|s| s.days_overdue)
        .max()
        .unwrap_or(0)
}
