//! 2023 federal bracket tables (spec.md §6) and the small tax-filing
//! types the tax subsystem (spec.md §4.8) reads off the plan.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    /// Lower bound of this bracket (inclusive).
    pub threshold: f64,
    pub rate: f64,
}

const fn b(threshold: f64, rate: f64) -> TaxBracket {
    TaxBracket { threshold, rate }
}

/// 2023 federal ordinary-income brackets, Single filer.
pub const FEDERAL_SINGLE_2023: &[TaxBracket] = &[
    b(0.0, 0.10),
    b(11_000.0, 0.12),
    b(44_725.0, 0.22),
    b(95_375.0, 0.24),
    b(182_050.0, 0.32),
    b(231_250.0, 0.35),
    b(578_125.0, 0.37),
];

/// 2023 federal ordinary-income brackets, Married Filing Jointly.
pub const FEDERAL_MFJ_2023: &[TaxBracket] = &[
    b(0.0, 0.10),
    b(22_000.0, 0.12),
    b(89_450.0, 0.22),
    b(190_750.0, 0.24),
    b(364_200.0, 0.32),
    b(462_500.0, 0.35),
    b(693_750.0, 0.37),
];

/// 2023 long-term capital gains brackets, Single filer.
pub const LTCG_SINGLE_2023: &[TaxBracket] = &[b(0.0, 0.0), b(44_725.0, 0.15), b(492_300.0, 0.20)];

/// 2023 long-term capital gains brackets, Married Filing Jointly.
pub const LTCG_MFJ_2023: &[TaxBracket] = &[b(0.0, 0.0), b(89_450.0, 0.15), b(553_850.0, 0.20)];

pub const STATE_FLAT_RATE: f64 = 0.05;
pub const LOCAL_FLAT_RATE: f64 = 0.01;
pub const DEPENDENT_CREDIT: f64 = 2_000.0;
pub const EARLY_WITHDRAWAL_PENALTY_RATE: f64 = 0.10;
/// Day offset from year-end at which the direct tax owed is paid out of
/// `irs_registered_account` (spec.md §4.8 step 3, §6).
pub const TAX_DAY_OFFSET_DAYS: f64 = 105.0;

/// Number of dependents claimed, for the `$2000`-per-dependent credit
/// (spec.md §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Dependents(pub u32);

/// Filing status; any value the schema doesn't recognize falls back to
/// `Single` (spec.md §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedFilingJointly,
}

impl FilingStatus {
    pub fn federal_brackets(self) -> &'static [TaxBracket] {
        match self {
            FilingStatus::Single => FEDERAL_SINGLE_2023,
            FilingStatus::MarriedFilingJointly => FEDERAL_MFJ_2023,
        }
    }

    pub fn ltcg_brackets(self) -> &'static [TaxBracket] {
        match self {
            FilingStatus::Single => LTCG_SINGLE_2023,
            FilingStatus::MarriedFilingJointly => LTCG_MFJ_2023,
        }
    }
}

/// `floor(59.5 * 365.25)`, the day-offset-from-birth boundary for the
/// retirement-account early-withdrawal penalty (spec.md §4.8 step 2,
/// GLOSSARY).
pub fn age_59_half_day() -> f64 {
    (59.5 * 365.25).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_59_half_day_matches_spec_constant() {
        assert_eq!(age_59_half_day(), 21_742.0);
    }

    #[test]
    fn bracket_tables_are_sorted_ascending() {
        for table in [
            FEDERAL_SINGLE_2023,
            FEDERAL_MFJ_2023,
            LTCG_SINGLE_2023,
            LTCG_MFJ_2023,
        ] {
            for w in table.windows(2) {
                assert!(w[0].threshold < w[1].threshold);
            }
        }
    }
}
