//! Tax subsystem core math (spec.md §4.8): bracketed federal/state/local
//! tax, LTCG brackets, the `calculateTaxes` contract, and year-end/59½ day
//! computation. `compilers::tax_system` drives these at compile time to
//! emit the `usa_tax_system` event's descriptors.

use jiff::civil::{date, Date};

use crate::date_math::fast_days_between;
use crate::model::{
    age_59_half_day, Dependents, FilingStatus, TaxBracket, DEPENDENT_CREDIT, EARLY_WITHDRAWAL_PENALTY_RATE,
    LOCAL_FLAT_RATE, STATE_FLAT_RATE,
};

/// Progressive bracket integration: the sum, over each bracket up to the
/// one containing `income`, of `(min(income, next_threshold) -
/// threshold) * rate`.
pub fn bracketed_tax(income: f64, brackets: &[TaxBracket]) -> f64 {
    if income <= 0.0 {
        return 0.0;
    }
    let mut tax = 0.0;
    for (i, bracket) in brackets.iter().enumerate() {
        if income <= bracket.threshold {
            break;
        }
        let upper = brackets.get(i + 1).map(|b| b.threshold).unwrap_or(f64::INFINITY);
        let taxed_in_bracket = income.min(upper) - bracket.threshold;
        tax += taxed_in_bracket * bracket.rate;
    }
    tax
}

/// Every value `calculateTaxes` needs, read from the same-index results of
/// the envelopes named on the `usa_tax_system` event (spec.md §4.8).
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxInputs {
    pub taxable_income: f64,
    pub p_401k_withdraw: f64,
    pub roth_ira_withdraw: f64,
    pub roth_ira_principle: f64,
    pub short_term_capital_gains: f64,
    pub long_term_capital_gains: f64,
    pub federal_withholding: f64,
    pub state_withholding: f64,
    pub local_withholding: f64,
    pub p_401k_withdraw_withholding: f64,
    pub ira_contributions: f64,
    pub dependents: Dependents,
    pub filing_status: FilingStatus,
    /// Age in days at the evaluation point, for the 59½ penalty test.
    pub age_days: f64,
}

/// `calculateTaxes(params)` (spec.md §4.8 contract). Clamped at 0.
pub fn calculate_taxes(inputs: &TaxInputs) -> f64 {
    let age_59_half = age_59_half_day();

    let mut taxable = inputs.taxable_income + inputs.p_401k_withdraw + inputs.short_term_capital_gains;
    if inputs.age_days <= age_59_half && inputs.roth_ira_withdraw > inputs.roth_ira_principle {
        taxable += inputs.roth_ira_withdraw - inputs.roth_ira_principle;
    }

    let federal = bracketed_tax(taxable, inputs.filing_status.federal_brackets());
    let state = STATE_FLAT_RATE * taxable;
    let local = LOCAL_FLAT_RATE * taxable;
    let ltcg = bracketed_tax(inputs.long_term_capital_gains, inputs.filing_status.ltcg_brackets());

    let withholdings = inputs.federal_withholding
        + inputs.state_withholding
        + inputs.local_withholding
        + inputs.p_401k_withdraw_withholding
        + inputs.ira_contributions;
    let dependent_credit = inputs.dependents.0 as f64 * DEPENDENT_CREDIT;

    let penalty = if inputs.age_days < age_59_half {
        EARLY_WITHDRAWAL_PENALTY_RATE * (inputs.p_401k_withdraw + inputs.roth_ira_withdraw)
    } else {
        0.0
    };

    (federal + state + local + ltcg + penalty - withholdings - dependent_credit).max(0.0)
}

/// Day-offsets from `birth_date` of every Dec 31 from `birth_date.year()`
/// onward whose offset lies within `[start_day, end_day]` (spec.md §4.8
/// step 1).
pub fn year_end_days(birth_date: Date, start_day: f64, end_day: f64) -> Vec<f64> {
    let mut days = Vec::new();
    let mut year = birth_date.year();
    loop {
        let dec_31 = date(year, 12, 31);
        let offset = fast_days_between(birth_date, dec_31) as f64;
        if offset > end_day {
            break;
        }
        if offset >= start_day {
            days.push(offset);
        }
        year += 1;
        // Guard against runaway loops on a malformed plan.
        if year as i32 - birth_date.year() as i32 > 200 {
            break;
        }
    }
    days
}
