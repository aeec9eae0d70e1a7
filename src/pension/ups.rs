//! Unified Pension Scheme: assured pension with post-retirement DA

use serde::Serialize;

use crate::career::DA_STEP;

/// Assured pension as a fraction of final basic pay
pub const UPS_PENSION_FRACTION: f64 = 0.5;

/// Months between post-retirement DA revisions
pub const DA_REVISION_MONTHS: u32 = 6;

/// One month of UPS pension after retirement
#[derive(Debug, Clone, Serialize)]
pub struct UpsPayoutRow {
    /// 1-based month after retirement
    pub month: u32,
    pub da_rate: f64,
    pub pension: f64,
    /// Pension paid up to and including this month
    pub cumulative: f64,
}

/// Base monthly pension before DA
pub fn base_pension(final_basic_pay: f64) -> f64 {
    UPS_PENSION_FRACTION * final_basic_pay
}

/// Lumpsum of one tenth of final basic pay per completed six months of service
pub fn lumpsum(final_basic_pay: f64, service_months: u32) -> f64 {
    let completed_half_years = service_months / 6;
    final_basic_pay * (completed_half_years as f64 / 10.0)
}

/// Month-wise pension over `months`, starting from the DA at retirement
///
/// DA rises by one step at month indices 6, 12, 18, ... (0-based), never at index 0.
pub fn payout_schedule(base_pension: f64, retirement_da: f64, months: u32) -> Vec<UpsPayoutRow> {
    let mut cumulative = 0.0;

    (0..months)
        .map(|index| {
            let revisions = index / DA_REVISION_MONTHS;
            let da_rate = retirement_da + revisions as f64 * DA_STEP;
            let pension = base_pension * (1.0 + da_rate);
            cumulative += pension;
            UpsPayoutRow {
                month: index + 1,
                da_rate,
                pension,
                cumulative,
            }
        })
        .collect()
}
