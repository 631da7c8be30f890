//! The growth kernel `f_growth(g, Δt)`.
//!
//! Pure function mapping a growth model and an elapsed-day delta to a
//! multiplier. Every descriptor contribution is `value · f_growth(growth,
//! t − t_k)`, so this is the single place compounding behavior lives.

use serde::{Deserialize, Serialize};

use crate::error::GrowthError;

/// One envelope's compounding behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GrowthModel {
    None,
    SimpleInterest { rate: f64 },
    DailyCompound { rate: f64 },
    MonthlyCompound { rate: f64 },
    YearlyCompound { rate: f64 },
    Appreciation { rate: f64 },
    Depreciation { rate: f64 },
    /// Straight-line depreciation to zero over `days_of_usefulness` days.
    DepreciationDays { days_of_usefulness: f64 },
}

impl GrowthModel {
    /// `true` if this growth model needs a strictly positive
    /// `days_of_usefulness` to be well-defined (the invariant spec.md §3
    /// calls out for `Depreciation (Days)`).
    pub fn validate(&self) -> Result<(), GrowthError> {
        if let GrowthModel::DepreciationDays { days_of_usefulness } = self
            && *days_of_usefulness <= 0.0
        {
            return Err(GrowthError::InvalidUsefulness(*days_of_usefulness));
        }
        Ok(())
    }
}

const DAYS_PER_YEAR: f64 = 365.25;
/// `Monthly Compound` uses 365, not 365.25, in its exponent — preserved for
/// bit-compatibility with the source implementation (spec.md §4.1, §9).
const DAYS_PER_YEAR_MONTHLY: f64 = 365.0;

/// `f_growth(g, Δt)`: the multiplier applied to a descriptor's base value
/// `Δt` days after its occurrence. `Δt` is expected to be `>= 0`; callers
/// (the vector evaluator) never invoke this for `t < t_k`.
pub fn f_growth(g: GrowthModel, delta_t: f64) -> Result<f64, GrowthError> {
    g.validate()?;
    Ok(match g {
        GrowthModel::None => 1.0,
        GrowthModel::SimpleInterest { rate } | GrowthModel::Appreciation { rate } => {
            1.0 + rate * delta_t / DAYS_PER_YEAR
        }
        GrowthModel::DailyCompound { rate } => (1.0 + rate / DAYS_PER_YEAR).powf(delta_t),
        GrowthModel::MonthlyCompound { rate } => {
            (1.0 + rate / 12.0).powf(12.0 * delta_t / DAYS_PER_YEAR_MONTHLY)
        }
        GrowthModel::YearlyCompound { rate } => (1.0 + rate).powf(delta_t / DAYS_PER_YEAR),
        GrowthModel::Depreciation { rate } => (0.0f64).max((1.0 - rate).powf(delta_t / DAYS_PER_YEAR)),
        GrowthModel::DepreciationDays { days_of_usefulness } => {
            (0.0f64).max(1.0 - delta_t / days_of_usefulness)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn none_is_always_one() {
        assert_close(f_growth(GrowthModel::None, 0.0).unwrap(), 1.0);
        assert_close(f_growth(GrowthModel::None, 10_000.0).unwrap(), 1.0);
    }

    #[test]
    fn zero_rate_growth_identity() {
        for g in [
            GrowthModel::SimpleInterest { rate: 0.0 },
            GrowthModel::DailyCompound { rate: 0.0 },
            GrowthModel::MonthlyCompound { rate: 0.0 },
            GrowthModel::YearlyCompound { rate: 0.0 },
            GrowthModel::Appreciation { rate: 0.0 },
        ] {
            assert_close(f_growth(g, 730.5).unwrap(), 1.0);
        }
        // Depreciation at rate 0 also holds steady at 1.
        assert_close(f_growth(GrowthModel::Depreciation { rate: 0.0 }, 730.5).unwrap(), 1.0);
    }

    #[test]
    fn yearly_compound_matches_scenario_3() {
        // spec.md §8 scenario 3: Cash growth Yearly Compound r=0.05
        let g = GrowthModel::YearlyCompound { rate: 0.05 };
        assert_close(f_growth(g, 0.0).unwrap(), 1.0);
        assert_close(f_growth(g, 365.0).unwrap(), 1.05f64.powf(365.0 / 365.25));
        assert_close(f_growth(g, 730.0).unwrap(), 1.05f64.powf(730.0 / 365.25));
    }

    #[test]
    fn monthly_compound_uses_365_not_365_25() {
        let g = GrowthModel::MonthlyCompound { rate: 0.12 };
        let expected = (1.0 + 0.12 / 12.0).powf(12.0 * 30.0 / 365.0);
        assert_close(f_growth(g, 30.0).unwrap(), expected);
    }

    #[test]
    fn depreciation_floors_at_zero() {
        let g = GrowthModel::Depreciation { rate: 1.5 };
        assert!(f_growth(g, 3650.0).unwrap() >= 0.0);
    }

    #[test]
    fn depreciation_days_reaches_zero_and_floors() {
        let g = GrowthModel::DepreciationDays {
            days_of_usefulness: 100.0,
        };
        assert_close(f_growth(g, 0.0).unwrap(), 1.0);
        assert_close(f_growth(g, 50.0).unwrap(), 0.5);
        assert_close(f_growth(g, 100.0).unwrap(), 0.0);
        assert_close(f_growth(g, 200.0).unwrap(), 0.0);
    }

    #[test]
    fn depreciation_days_rejects_non_positive_usefulness() {
        let g = GrowthModel::DepreciationDays {
            days_of_usefulness: 0.0,
        };
        assert!(f_growth(g, 1.0).is_err());
    }
}
