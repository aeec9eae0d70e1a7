//! Pay commission calendar

use crate::error::ConfigError;
use crate::reference::CpcLabel;
use serde::Serialize;

/// Calendar years in which the 8th, 9th, 10th and 11th CPC take effect
pub const DEFAULT_CPC_YEARS: [i32; 4] = [2026, 2036, 2046, 2056];

/// A pay commission and the year it takes effect (each switch happens in January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpcCycle {
    pub label: CpcLabel,
    /// `None` for the base commission, which is in force from the start
    pub start_year: Option<i32>,
}

/// Base commission followed by future commissions in chronological order
#[derive(Debug, Clone, PartialEq)]
pub struct CpcSchedule {
    cycles: Vec<CpcCycle>,
}

impl CpcSchedule {
    /// Schedule with labels numbered consecutively after the base commission
    pub fn new(start_years: &[i32]) -> Result<Self, ConfigError> {
        if start_years.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::UnorderedCpcYears(start_years.to_vec()));
        }

        let mut cycles = Vec::with_capacity(start_years.len() + 1);
        let mut label = CpcLabel::BASE;
        cycles.push(CpcCycle { label, start_year: None });

        for &year in start_years {
            label = label
                .next()
                .ok_or(ConfigError::TooManyCycles(start_years.len()))?;
            cycles.push(CpcCycle { label, start_year: Some(year) });
        }

        Ok(Self { cycles })
    }

    pub fn cycles(&self) -> &[CpcCycle] {
        &self.cycles
    }

    /// Commission in force for someone joining in `year`/`month`
    ///
    /// A January joining in a commission year starts under the previous
    /// commission; the switch is then applied in the first simulated month.
    pub fn active_at_joining(&self, year: i32, month: u32) -> usize {
        self.cycles
            .iter()
            .rposition(|cycle| match cycle.start_year {
                None => true,
                Some(start) => start < year || (start == year && month > 1),
            })
            .unwrap_or(0)
    }
}

impl Default for CpcSchedule {
    fn default() -> Self {
        let mut label = CpcLabel::BASE;
        let mut cycles = vec![CpcCycle { label, start_year: None }];
        for year in DEFAULT_CPC_YEARS {
            label = CpcLabel::new(label.ordinal() + 1);
            cycles.push(CpcCycle { label, start_year: Some(year) });
        }
        Self { cycles }
    }
}
