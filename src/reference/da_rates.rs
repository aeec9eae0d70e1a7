//! Dearness allowance history

use crate::error::ReferenceDataError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// DA rate notified from an effective date onwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaRate {
    pub effective_date: NaiveDate,
    /// Fraction of basic pay (0.58 = 58%)
    pub rate: f64,
}

/// Chronologically ordered DA notifications
#[derive(Debug, Clone, Default)]
pub struct DaRateTable {
    rates: Vec<DaRate>,
}

impl DaRateTable {
    /// Build a table, sorting by effective date
    ///
    /// Entries sharing a date keep their input order; the later one wins on lookup.
    pub fn new(mut rates: Vec<DaRate>) -> Result<Self, ReferenceDataError> {
        if let Some(bad) = rates.iter().find(|r| !(r.rate >= 0.0) || !r.rate.is_finite()) {
            return Err(ReferenceDataError::NegativeDaRate {
                date: bad.effective_date,
                rate: bad.rate,
            });
        }
        rates.sort_by_key(|r| r.effective_date);
        Ok(Self { rates })
    }

    /// Table with no notifications; every lookup falls back to 0
    pub fn empty() -> Self {
        Self::default()
    }

    /// Most recent notification effective on or before `date`
    pub fn latest_as_of(&self, date: NaiveDate) -> Option<&DaRate> {
        let idx = self.rates.partition_point(|r| r.effective_date <= date);
        idx.checked_sub(1).map(|i| &self.rates[i])
    }

    /// DA rate in force on `date`, 0.0 when nothing had been notified yet
    pub fn rate_as_of(&self, date: NaiveDate) -> f64 {
        match self.latest_as_of(date) {
            Some(entry) => entry.rate,
            None => {
                log::warn!("no DA rate notified on or before {date}, using 0");
                0.0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DaRate> {
        self.rates.iter()
    }
}
