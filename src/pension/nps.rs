//! National Pension System: annuity purchased with part of the corpus

use serde::Serialize;

/// One month of NPS annuity income after retirement
#[derive(Debug, Clone, Serialize)]
pub struct NpsPayoutRow {
    /// 1-based month after retirement
    pub month: u32,
    /// Annuity corpus after this month's growth
    pub annuity_corpus: f64,
    pub payout: f64,
    /// Annuity paid up to and including this month
    pub cumulative: f64,
}

/// Part of the corpus taken in cash at retirement
pub fn lumpsum(corpus: f64, annuity_pct: f64) -> f64 {
    corpus * (1.0 - annuity_pct)
}

/// Part of the corpus used to buy the annuity
pub fn annuity_corpus(corpus: f64, annuity_pct: f64) -> f64 {
    corpus * annuity_pct
}

/// Monthly annuity on a fixed corpus
pub fn monthly_annuity(annuity_corpus: f64, annuity_rate: f64) -> f64 {
    annuity_corpus * annuity_rate / 12.0
}

/// Month-wise annuity over `months`
///
/// With a positive `growth_rate` the annuity corpus compounds by `growth_rate / 12`
/// each month before that month's payout is computed.
pub fn payout_schedule(
    annuity_corpus: f64,
    annuity_rate: f64,
    growth_rate: f64,
    months: u32,
) -> Vec<NpsPayoutRow> {
    let mut corpus = annuity_corpus;
    let mut cumulative = 0.0;

    (0..months)
        .map(|index| {
            if growth_rate > 0.0 {
                corpus *= 1.0 + growth_rate / 12.0;
            }
            let payout = monthly_annuity(corpus, annuity_rate);
            cumulative += payout;
            NpsPayoutRow {
                month: index + 1,
                annuity_corpus: corpus,
                payout,
                cumulative,
            }
        })
        .collect()
}
