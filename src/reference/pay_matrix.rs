//! Pay matrix: basic pay indexed by level and pay position for one pay commission

use crate::error::ReferenceDataError;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Pay level label (`1`, `10`, `13A`, ...)
///
/// Levels order naturally: numeric prefix first, then the suffix, so
/// `9 < 10 < 13 < 13A < 14`. Labels without a numeric prefix sort last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(String);

impl Level {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self(label.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn sort_key(&self) -> (bool, u64, &str) {
        let digits = self.0.bytes().take_while(u8::is_ascii_digit).count();
        match self.0[..digits].parse::<u64>() {
            Ok(number) => (false, number, &self.0[digits..]),
            Err(_) => (true, 0, self.0.as_str()),
        }
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Level {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Pay commission label, displayed as `7CPC`, `8CPC`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CpcLabel(u8);

impl CpcLabel {
    /// The commission the bundled pay matrix belongs to
    pub const BASE: CpcLabel = CpcLabel(7);

    pub const fn new(ordinal: u8) -> Self {
        Self(ordinal)
    }

    pub fn ordinal(&self) -> u8 {
        self.0
    }

    /// The following commission, or `None` past `255CPC`
    pub fn next(&self) -> Option<CpcLabel> {
        self.0.checked_add(1).map(CpcLabel)
    }
}

impl fmt::Display for CpcLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}CPC", self.0)
    }
}

impl Serialize for CpcLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One cell of a pay matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayMatrixEntry {
    pub level: Level,
    pub position: u32,
    pub cpc: CpcLabel,
    pub basic_pay: f64,
}

/// Basic pay by (level, position) for a single pay commission
///
/// Positions within a level are contiguous and 1-based, so each level is
/// stored as a vector indexed by `position - 1`.
#[derive(Debug, Clone)]
pub struct PayMatrix {
    cpc: CpcLabel,
    levels: Vec<Level>,
    pay: HashMap<Level, Vec<f64>>,
}

impl PayMatrix {
    /// Build a matrix from `(level, position, basic_pay)` cells
    ///
    /// Rejects empty input, duplicate cells, gaps in the position sequence
    /// and pay that decreases with position.
    pub fn from_entries<I>(cpc: CpcLabel, entries: I) -> Result<Self, ReferenceDataError>
    where
        I: IntoIterator<Item = (Level, u32, f64)>,
    {
        let mut grouped: BTreeMap<Level, BTreeMap<u32, f64>> = BTreeMap::new();

        for (level, position, basic_pay) in entries {
            if position == 0 {
                return Err(ReferenceDataError::ZeroPosition { level });
            }
            let cells = grouped.entry(level.clone()).or_default();
            if cells.insert(position, basic_pay).is_some() {
                return Err(ReferenceDataError::DuplicatePosition { level, position });
            }
        }

        if grouped.is_empty() {
            return Err(ReferenceDataError::EmptyMatrix);
        }

        let mut pay = HashMap::with_capacity(grouped.len());
        for (level, cells) in grouped.iter() {
            let mut column = Vec::with_capacity(cells.len());
            for (expected, (&position, &basic_pay)) in (1u32..).zip(cells.iter()) {
                if position != expected {
                    return Err(ReferenceDataError::NonContiguousPositions {
                        level: level.clone(),
                        expected,
                        found: position,
                    });
                }
                if column.last().is_some_and(|&previous| basic_pay < previous) {
                    return Err(ReferenceDataError::DecreasingPay {
                        level: level.clone(),
                        position,
                    });
                }
                column.push(basic_pay);
            }
            pay.insert(level.clone(), column);
        }

        Ok(Self {
            cpc,
            levels: grouped.into_keys().collect(),
            pay,
        })
    }

    /// Pay commission this matrix belongs to
    pub fn cpc(&self) -> CpcLabel {
        self.cpc
    }

    /// Basic pay at a cell, `None` when the cell does not exist
    pub fn basic_pay(&self, level: &Level, position: u32) -> Option<f64> {
        let index = position.checked_sub(1)? as usize;
        self.pay.get(level)?.get(index).copied()
    }

    /// Distinct levels in ascending order
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn contains_level(&self, level: &Level) -> bool {
        self.pay.contains_key(level)
    }

    /// Number of positions defined for a level (0 if the level is absent)
    pub fn positions(&self, level: &Level) -> u32 {
        self.pay.get(level).map_or(0, |column| column.len() as u32)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.pay.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells ordered by level, then position
    pub fn entries(&self) -> impl Iterator<Item = PayMatrixEntry> + '_ {
        self.levels.iter().flat_map(move |level| {
            self.pay[level]
                .iter()
                .zip(1u32..)
                .map(move |(&basic_pay, position)| PayMatrixEntry {
                    level: level.clone(),
                    position,
                    cpc: self.cpc,
                    basic_pay,
                })
        })
    }

    /// Copy of this matrix under a new label with every cell transformed
    ///
    /// `revise` must be non-decreasing so the per-level ordering survives.
    pub(crate) fn revised(&self, cpc: CpcLabel, revise: impl Fn(f64) -> f64) -> Self {
        let pay = self
            .pay
            .iter()
            .map(|(level, column)| (level.clone(), column.iter().map(|&p| revise(p)).collect()))
            .collect();

        Self {
            cpc,
            levels: self.levels.clone(),
            pay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(level: &str, position: u32, pay: f64) -> (Level, u32, f64) {
        (Level::from(level), position, pay)
    }

    #[test]
    fn test_level_natural_order() {
        let mut levels: Vec<Level> = ["14", "13A", "2", "10", "13", "1"]
            .into_iter()
            .map(Level::from)
            .collect();
        levels.sort();

        let labels: Vec<&str> = levels.iter().map(Level::as_str).collect();
        assert_eq!(labels, vec!["1", "2", "10", "13", "13A", "14"]);
    }

    #[test]
    fn test_cpc_label_display() {
        assert_eq!(CpcLabel::BASE.to_string(), "7CPC");
        assert_eq!(CpcLabel::BASE.next(), Some(CpcLabel::new(8)));
    }

    #[test]
    fn test_lookup_by_level_and_position() {
        let matrix = PayMatrix::from_entries(
            CpcLabel::BASE,
            vec![cell("1", 2, 18500.0), cell("1", 1, 18000.0), cell("2", 1, 19900.0)],
        )
        .unwrap();

        assert_eq!(matrix.basic_pay(&Level::from("1"), 1), Some(18000.0));
        assert_eq!(matrix.basic_pay(&Level::from("1"), 2), Some(18500.0));
        assert_eq!(matrix.basic_pay(&Level::from("1"), 3), None);
        assert_eq!(matrix.basic_pay(&Level::from("1"), 0), None);
        assert_eq!(matrix.basic_pay(&Level::from("3"), 1), None);
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.positions(&Level::from("1")), 2);
    }

    #[test]
    fn test_rejects_gaps_and_duplicates() {
        let gap = PayMatrix::from_entries(
            CpcLabel::BASE,
            vec![cell("1", 1, 100.0), cell("1", 3, 120.0)],
        );
        assert!(matches!(
            gap,
            Err(ReferenceDataError::NonContiguousPositions { expected: 2, found: 3, .. })
        ));

        let duplicate = PayMatrix::from_entries(
            CpcLabel::BASE,
            vec![cell("1", 1, 100.0), cell("1", 1, 100.0)],
        );
        assert!(matches!(duplicate, Err(ReferenceDataError::DuplicatePosition { .. })));

        let decreasing = PayMatrix::from_entries(
            CpcLabel::BASE,
            vec![cell("1", 1, 100.0), cell("1", 2, 90.0)],
        );
        assert!(matches!(decreasing, Err(ReferenceDataError::DecreasingPay { position: 2, .. })));

        let empty = PayMatrix::from_entries(CpcLabel::BASE, Vec::new());
        assert!(matches!(empty, Err(ReferenceDataError::EmptyMatrix)));
    }

    #[test]
    fn test_entries_are_ordered() {
        let matrix = PayMatrix::from_entries(
            CpcLabel::BASE,
            vec![cell("10", 1, 56100.0), cell("9", 1, 53100.0), cell("9", 2, 54700.0)],
        )
        .unwrap();

        let cells: Vec<(String, u32)> = matrix
            .entries()
            .map(|e| (e.level.to_string(), e.position))
            .collect();
        assert_eq!(
            cells,
            vec![("9".to_string(), 1), ("9".to_string(), 2), ("10".to_string(), 1)]
        );
    }
}
