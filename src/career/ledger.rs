//! Monthly ledger produced by a career simulation

use chrono::NaiveDate;
use serde::Serialize;

use crate::reference::{CpcLabel, Level};

/// Snapshot of pay and NPS state after one month's transitions
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRecord {
    /// First day of the simulated month
    pub period: NaiveDate,
    pub month: u32,
    pub year: i32,

    pub level: Level,
    pub position: u32,
    pub cpc: CpcLabel,

    /// Basic pay after this month's increment/promotion
    pub basic_pay: f64,
    pub da_rate: f64,
    /// DA on the month-opening basic pay
    pub da_amount: f64,
    pub total_emoluments: f64,

    pub nps_contribution: f64,
    /// Corpus after this month's contribution and growth
    pub nps_corpus: f64,

    /// Commission switched to in this month, if any
    pub cpc_applied: Option<CpcLabel>,
}

impl MonthlyRecord {
    /// Display label such as `Jan-2017`
    pub fn month_label(&self) -> String {
        self.period.format("%b-%Y").to_string()
    }
}

/// Chronological ledger of a career
#[derive(Debug, Clone, Serialize)]
pub struct CareerLedger {
    /// Basic pay on the joining date
    pub initial_basic_pay: f64,

    pub records: Vec<MonthlyRecord>,
}

impl CareerLedger {
    pub fn new(initial_basic_pay: f64) -> Self {
        Self {
            initial_basic_pay,
            records: Vec::new(),
        }
    }

    /// Append the next month
    pub fn add_record(&mut self, record: MonthlyRecord) {
        self.records.push(record);
    }

    pub fn last(&self) -> Option<&MonthlyRecord> {
        self.records.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> CareerSummary {
        let total_nps_contributions: f64 = self.records.iter().map(|r| r.nps_contribution).sum();
        let promotions = self
            .records
            .windows(2)
            .filter(|pair| pair[1].level != pair[0].level)
            .count() as u32;

        let last = self.records.last();

        CareerSummary {
            total_months: self.records.len() as u32,
            initial_basic_pay: self.initial_basic_pay,
            final_basic_pay: last.map_or(self.initial_basic_pay, |r| r.basic_pay),
            final_da_rate: last.map_or(0.0, |r| r.da_rate),
            final_nps_corpus: last.map_or(0.0, |r| r.nps_corpus),
            total_nps_contributions,
            promotions,
            final_level: last.map(|r| r.level.clone()),
            final_position: last.map(|r| r.position),
            final_cpc: last.map(|r| r.cpc),
        }
    }
}

/// Summary of a career ledger
#[derive(Debug, Clone, Serialize)]
pub struct CareerSummary {
    pub total_months: u32,
    pub initial_basic_pay: f64,
    pub final_basic_pay: f64,
    pub final_da_rate: f64,
    pub final_nps_corpus: f64,
    pub total_nps_contributions: f64,
    pub promotions: u32,
    pub final_level: Option<Level>,
    pub final_position: Option<u32>,
    pub final_cpc: Option<CpcLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: NaiveDate, level: &str, basic_pay: f64, contribution: f64, corpus: f64) -> MonthlyRecord {
        MonthlyRecord {
            period,
            month: 1,
            year: 2017,
            level: Level::from(level),
            position: 1,
            cpc: CpcLabel::BASE,
            basic_pay,
            da_rate: 0.03,
            da_amount: basic_pay * 0.03,
            total_emoluments: basic_pay * 1.03,
            nps_contribution: contribution,
            nps_corpus: corpus,
            cpc_applied: None,
        }
    }

    #[test]
    fn test_summary_of_empty_ledger() {
        let summary = CareerLedger::new(18000.0).summary();
        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.final_basic_pay, 18000.0);
        assert_eq!(summary.final_nps_corpus, 0.0);
        assert!(summary.final_level.is_none());
    }

    #[test]
    fn test_summary_tracks_final_state() {
        let jan = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2017, 2, 1).unwrap();
        let mut ledger = CareerLedger::new(18000.0);
        ledger.add_record(record(jan, "1", 18500.0, 100.0, 101.0));
        ledger.add_record(record(feb, "2", 19900.0, 150.0, 253.0));

        let summary = ledger.summary();
        assert_eq!(summary.total_months, 2);
        assert_eq!(summary.final_basic_pay, 19900.0);
        assert_eq!(summary.total_nps_contributions, 250.0);
        assert_eq!(summary.promotions, 1);
        assert_eq!(summary.final_level, Some(Level::from("2")));
        assert_eq!(ledger.records[0].month_label(), "Jan-2017");
    }
}
