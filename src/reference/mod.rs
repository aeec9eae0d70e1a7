//! Reference data: the base pay matrix and the DA history

mod pay_matrix;
mod da_rates;
pub mod loader;

pub use pay_matrix::{Level, CpcLabel, PayMatrix, PayMatrixEntry};
pub use da_rates::{DaRate, DaRateTable};
pub use loader::DEFAULT_DATA_PATH;

use crate::error::ReferenceDataError;
use std::path::Path;

const BUILTIN_PAY_MATRIX: &str = include_str!("../../data/pay_matrix.csv");
const BUILTIN_DA_TABLE: &str = include_str!("../../data/da_table.csv");

/// Read-only tables every run starts from
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub pay_matrix: PayMatrix,
    pub da_rates: DaRateTable,
}

impl ReferenceData {
    pub fn new(pay_matrix: PayMatrix, da_rates: DaRateTable) -> Self {
        Self { pay_matrix, da_rates }
    }

    /// 7th CPC matrix and DA notifications compiled into the binary
    pub fn builtin() -> Result<Self, ReferenceDataError> {
        Ok(Self {
            pay_matrix: loader::pay_matrix_from_reader(BUILTIN_PAY_MATRIX.as_bytes())?,
            da_rates: loader::da_table_from_reader(BUILTIN_DA_TABLE.as_bytes())?,
        })
    }

    /// Load reference data from CSV files in the default location (data/)
    pub fn from_csv() -> Result<Self, ReferenceDataError> {
        Self::from_csv_path(Path::new(DEFAULT_DATA_PATH))
    }

    /// Load reference data from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, ReferenceDataError> {
        Ok(Self {
            pay_matrix: loader::load_pay_matrix(path.join(loader::PAY_MATRIX_FILE))?,
            da_rates: loader::load_da_table(path.join(loader::DA_TABLE_FILE))?,
        })
    }

    /// Same pay matrix with the DA history replaced
    pub fn with_da_rates(&self, da_rates: DaRateTable) -> Self {
        Self {
            pay_matrix: self.pay_matrix.clone(),
            da_rates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_reference_data() {
        let reference = ReferenceData::builtin().expect("bundled data should parse");

        let levels = reference.pay_matrix.levels();
        assert_eq!(levels.first(), Some(&Level::from("1")));
        assert_eq!(levels.last(), Some(&Level::from("18")));
        assert_eq!(reference.pay_matrix.positions(&Level::from("1")), 40);
        assert_eq!(reference.da_rates.len(), 20);
    }
}
