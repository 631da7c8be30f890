//! `usa_tax_system` (spec.md §4.8): the most complex compiler. Lays down
//! one reconciliation per calendar year the run covers — resets on the
//! per-year tracking envelopes, the incremental 401(k)-inclusion tax via
//! `LazyFromEnvelopes`, the direct tax-day outflow, and the 59½
//! early-withdrawal penalty scaffolding.

use crate::error::SimulationError;
use crate::model::{
    age_59_half_day, Descriptor, Direction, EnvelopeKey, EnvelopeStore, Event, Plan, TaxSystemParams,
    ValueSource, EARLY_WITHDRAWAL_PENALTY_RATE, TAX_DAY_OFFSET_DAYS,
};
use crate::taxes::{calculate_taxes, year_end_days, TaxInputs};

use super::require_envelope;

/// Envelopes `usa_tax_system` resets to zero at each year-end (spec.md
/// §4.8 step 3): the per-year income/withholding/capital-gains trackers.
/// The running balances (`p_401k`, `roth`, `roth_ira_principle`,
/// `irs_registered_account`) and the penalty envelopes (reset separately
/// at 59½, step 4) are excluded.
struct ResettableEnvelopes {
    taxable_income: EnvelopeKey,
    federal_withholdings: EnvelopeKey,
    state_withholdings: EnvelopeKey,
    local_withholdings: EnvelopeKey,
    ira_contributions: EnvelopeKey,
    p_401k_withdraw: EnvelopeKey,
    p_401k_withdraw_withholding: EnvelopeKey,
    roth_ira_withdraw: EnvelopeKey,
    short_term_capital_gains: EnvelopeKey,
    long_term_capital_gains: EnvelopeKey,
}

pub fn compile_tax_system(
    event: &Event,
    params: &TaxSystemParams,
    plan: &Plan,
    store: &mut EnvelopeStore,
    start_day: f64,
    end_day: f64,
) -> Result<(), SimulationError> {
    if !event.enabled("Tax system enabled") {
        return Ok(());
    }

    let resettable = ResettableEnvelopes {
        taxable_income: require_envelope(store, event, &params.taxable_income)?,
        federal_withholdings: require_envelope(store, event, &params.federal_withholdings)?,
        state_withholdings: require_envelope(store, event, &params.state_withholdings)?,
        local_withholdings: require_envelope(store, event, &params.local_withholdings)?,
        ira_contributions: require_envelope(store, event, &params.ira_contributions)?,
        p_401k_withdraw: require_envelope(store, event, &params.p_401k_withdraw)?,
        p_401k_withdraw_withholding: require_envelope(store, event, &params.p_401k_withdraw_withholding)?,
        roth_ira_withdraw: require_envelope(store, event, &params.roth_ira_withdraw)?,
        short_term_capital_gains: require_envelope(store, event, &params.short_term_capital_gains)?,
        long_term_capital_gains: require_envelope(store, event, &params.long_term_capital_gains)?,
    };
    let p_401k = require_envelope(store, event, &params.p_401k)?;
    let taxes_401k = require_envelope(store, event, &params.taxes_401k)?;
    let irs_registered_account = require_envelope(store, event, &params.irs_registered_account)?;
    let penalty_401k = require_envelope(store, event, &params.penalty_401k)?;
    let penalty_roth = require_envelope(store, event, &params.penalty_roth)?;
    let roth = require_envelope(store, event, &params.roth)?;

    let filing_status = plan.filing_status;
    let dependents = plan.dependents;

    for yed in year_end_days(plan.birth_date, start_day, end_day) {
        reset_envelope(store, resettable.taxable_income, yed);
        reset_envelope(store, resettable.federal_withholdings, yed);
        reset_envelope(store, resettable.state_withholdings, yed);
        reset_envelope(store, resettable.local_withholdings, yed);
        reset_envelope(store, resettable.ira_contributions, yed);
        reset_envelope(store, resettable.p_401k_withdraw, yed);
        reset_envelope(store, resettable.p_401k_withdraw_withholding, yed);
        reset_envelope(store, resettable.roth_ira_withdraw, yed);
        reset_envelope(store, resettable.short_term_capital_gains, yed);
        reset_envelope(store, resettable.long_term_capital_gains, yed);

        // The incremental tax attributable to 401(k) inclusion: the
        // difference between taxing `taxable_income` with and without the
        // current 401(k) balance folded in (spec.md §4.8 step 3).
        let taxable_income_key = resettable.taxable_income;
        store.append_descriptor(
            taxes_401k,
            Descriptor::LazyFromEnvelopes {
                t_k: yed,
                compute: Box::new(move |reader, index| {
                    let taxable_income = reader.value_at(taxable_income_key, index);
                    let p_401k_balance = reader.value_at(p_401k, index);
                    let base = TaxInputs {
                        taxable_income,
                        filing_status,
                        dependents,
                        age_days: yed,
                        ..Default::default()
                    };
                    let mut with_401k = base;
                    with_401k.taxable_income += p_401k_balance;
                    calculate_taxes(&with_401k) - calculate_taxes(&base)
                }),
            },
        );

        // Direct tax owed, paid out `TAX_DAY_OFFSET_DAYS` after year-end.
        // Computed here at compile time, before the withholdings/capital
        // gains/withdrawal envelopes this year actually accumulate any
        // value — so this uses near-zero inputs rather than the true
        // year-end balances. This mirrors the source's own
        // `taxEnvelopesBalances` peek path rather than silently fixing it;
        // see DESIGN.md and spec.md §9's open question.
        let tax_day = yed + TAX_DAY_OFFSET_DAYS;
        let owed = calculate_taxes(&TaxInputs {
            filing_status,
            dependents,
            age_days: yed,
            ..Default::default()
        });
        if owed > 0.0 {
            store.append_descriptor(
                irs_registered_account,
                Descriptor::T {
                    direction: Direction::Out,
                    growth: irs_registered_account,
                    t_k: tax_day,
                    t0: tax_day,
                    value: ValueSource::Fixed(owed),
                },
            );
        }
    }

    // 59½ early-withdrawal penalty (spec.md §4.8 step 4, step 2's skip
    // condition: outside the run's day range, there's nothing to emit).
    let age_59_half = age_59_half_day();
    if age_59_half >= start_day && age_59_half <= end_day {
        store.append_descriptor(
            penalty_401k,
            Descriptor::ScaleFromEnvelope {
                direction: Direction::Out,
                source: p_401k,
                coeff: EARLY_WITHDRAWAL_PENALTY_RATE,
                until_day: age_59_half,
            },
        );
        store.append_descriptor(
            penalty_roth,
            Descriptor::ScaleFromEnvelope {
                direction: Direction::Out,
                source: roth,
                coeff: EARLY_WITHDRAWAL_PENALTY_RATE,
                until_day: age_59_half,
            },
        );
        store.append_descriptor(
            penalty_401k,
            Descriptor::LazyCorrection {
                t_k: age_59_half,
                target: 0.0,
            },
        );
        store.append_descriptor(
            penalty_roth,
            Descriptor::LazyCorrection {
                t_k: age_59_half,
                target: 0.0,
            },
        );
    }

    Ok(())
}

fn reset_envelope(store: &mut EnvelopeStore, envelope: EnvelopeKey, t_k: f64) {
    store.append_descriptor(envelope, Descriptor::LazyCorrection { t_k, target: 0.0 });
}
