use super::Installment;

/// earliest unpaid installment; first-encountered wins on duplicate months
pub fn next_obligation(schedules: &[Installment]) -> Option<&Installment> {
    let mut next: Option<&Installment> = None;
    for row in schedules.iter().filter(|s| !s.unpaid_amount.is_zero()) {
        match next {
            Some(current) if row.month < current.month => next = Some(row),
            None => next = Some(row),
            _ => {}
        }
    }
    next
}

/// highest month across all rows, paid or not; 0 without a schedule
pub fn months_taken(schedules: &[Installment]) -> u32 {
    schedules.iter().map(|s| s.month).max().unwrap_or(0)
}

/// count of rows still carrying an unpaid remainder
pub fn months_remaining(schedules: &[Installment]) -> u32 {
    schedules
        .iter()
        .filter(|s| !s.unpaid_amount.is_zero())
        .count() as u32
}
