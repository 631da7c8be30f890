//! `loan`, `buy_house`, `buy_car` (plain amortizing debt) and
//! `federal_subsidized_loan`/`federal_unsubsidized_loan`/
//! `private_student_loan` (student-loan variants with a deferred payment
//! start).
//!
//! Both kinds share the same shape: a one-shot principal movement (debt
//! goes to `-P`, cash goes to `+P`), a recurring monthly amortization
//! payment computed from the closed-form annuity formula, and an
//! end-of-schedule correction pair that drives the debt envelope back to
//! zero and mirrors the same adjustment onto cash.
//!
//! The recurring payment on the debt envelope carries `direction: In` (it
//! reduces the magnitude of a negative balance) but so does the mirrored
//! descriptor on the cash envelope, which should be `Out` — paying down a
//! loan spends cash, it doesn't add to it. That mismatch is preserved
//! rather than corrected; see the design notes for why.

use crate::error::SimulationError;
use crate::model::{Descriptor, Direction, EnvelopeKey, EnvelopeStore, Event, LoanParams, StudentLoanParams, ValueSource};

use super::require_envelope;

const DAYS_PER_YEAR: f64 = 365.25;
const MONTHLY_PAYMENT_FREQUENCY_DAYS: f64 = 30.4375;

/// `f_monthly_payment(P, r, y)`: closed-form annuity payment. `r = 0`
/// degenerates to even principal division.
pub(crate) fn monthly_payment(principal: f64, rate: f64, years: f64) -> f64 {
    let n = 12.0 * years;
    if rate == 0.0 {
        return principal / n;
    }
    let monthly_rate = rate / 12.0;
    let growth = (1.0 + monthly_rate).powf(n);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Emit the principal legs, recurring amortization, and end-of-schedule
/// correction pair shared by every loan kind. `start` is when the
/// principal moves; `amortize_from` is when monthly payments begin
/// (equal to `start` for a plain loan, later for a deferred student loan).
fn compile_amortizing_debt(
    event: &Event,
    debt: EnvelopeKey,
    cash: EnvelopeKey,
    principal: f64,
    rate: f64,
    years: f64,
    start: f64,
    amortize_from: f64,
    store: &mut EnvelopeStore,
) {
    if event.enabled("Outflow enabled") {
        store.append_descriptor(
            debt,
            Descriptor::T {
                direction: Direction::Out,
                growth: debt,
                t_k: start,
                t0: start,
                value: ValueSource::Fixed(principal),
            },
        );
    }
    if event.enabled("Inflow enabled") {
        store.append_descriptor(
            cash,
            Descriptor::T {
                direction: Direction::In,
                growth: cash,
                t_k: start,
                t0: start,
                value: ValueSource::Fixed(principal),
            },
        );
    }

    let schedule_end = amortize_from + years * DAYS_PER_YEAR;
    let payment = monthly_payment(principal, rate, years);

    store.append_descriptor(
        debt,
        Descriptor::R {
            direction: Direction::In,
            growth: debt,
            t0: amortize_from + MONTHLY_PAYMENT_FREQUENCY_DAYS,
            dt: MONTHLY_PAYMENT_FREQUENCY_DAYS,
            tf: schedule_end,
            value: ValueSource::Fixed(payment),
        },
    );
    // "monthly payment from cash (R - out)", emitted as `In` — preserved.
    store.append_descriptor(
        cash,
        Descriptor::R {
            direction: Direction::In,
            growth: cash,
            t0: amortize_from + MONTHLY_PAYMENT_FREQUENCY_DAYS,
            dt: MONTHLY_PAYMENT_FREQUENCY_DAYS,
            tf: schedule_end,
            value: ValueSource::Fixed(payment),
        },
    );

    // The debt leg drives to zero via a stage-10 `LazyCorrection`, as
    // spec.md §4.7/§8 name. The cash leg needs to mirror whatever was
    // actually left on the debt leg at that point — a fixed `target`
    // can't express that, so it stays a cross-envelope read; see
    // DESIGN.md's Open Question decisions. It reads the prior grid index
    // rather than `schedule_end` itself because by stage 30 the debt
    // envelope's own correction has already driven its value at
    // `schedule_end` to zero, so the leftover balance is only still
    // visible one index earlier.
    store.append_descriptor(
        debt,
        Descriptor::LazyCorrection {
            t_k: schedule_end,
            target: 0.0,
        },
    );
    store.append_descriptor(
        cash,
        Descriptor::LazyFromEnvelopes {
            t_k: schedule_end,
            compute: Box::new(move |reader, index| reader.value_at(debt, index.saturating_sub(1))),
        },
    );
}

pub fn compile_loan(event: &Event, params: &LoanParams, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    let debt = require_envelope(store, event, &params.debt_envelope)?;
    let cash = require_envelope(store, event, &params.cash_envelope)?;
    compile_amortizing_debt(
        event,
        debt,
        cash,
        params.principal,
        params.rate,
        params.years,
        params.start_time,
        params.start_time,
        store,
    );
    Ok(())
}

/// `subsidized` loans accrue no interest before `payment_start`; the
/// unsubsidized/private kinds capitalize daily-compound interest on the
/// principal over the deferment period as a single lump sum the day
/// payments begin (the engine's own growth kernel would need the debt
/// envelope's `GrowthModel` to change mid-run to model this continuously,
/// which the architecture doesn't support — plans should declare
/// student-loan debt envelopes with `GrowthModel::None` and let this
/// compiler bake in the deferment interest instead).
pub fn compile_student_loan(
    event: &Event,
    params: &StudentLoanParams,
    store: &mut EnvelopeStore,
    subsidized: bool,
) -> Result<(), SimulationError> {
    let debt = require_envelope(store, event, &params.debt_envelope)?;
    let cash = require_envelope(store, event, &params.cash_envelope)?;

    let capitalized_principal = if subsidized {
        params.principal
    } else {
        let deferment_days = (params.payment_start - params.start_time).max(0.0);
        params.principal * (1.0 + params.rate / DAYS_PER_YEAR).powf(deferment_days)
    };

    if event.enabled("Outflow enabled") {
        store.append_descriptor(
            debt,
            Descriptor::T {
                direction: Direction::Out,
                growth: debt,
                t_k: params.start_time,
                t0: params.start_time,
                value: ValueSource::Fixed(params.principal),
            },
        );
    }
    if event.enabled("Inflow enabled") {
        store.append_descriptor(
            cash,
            Descriptor::T {
                direction: Direction::In,
                growth: cash,
                t_k: params.start_time,
                t0: params.start_time,
                value: ValueSource::Fixed(params.principal),
            },
        );
    }

    let accrued = capitalized_principal - params.principal;
    if accrued.abs() > 0.0 {
        store.append_descriptor(
            debt,
            Descriptor::T {
                direction: Direction::Out,
                growth: debt,
                t_k: params.payment_start,
                t0: params.payment_start,
                value: ValueSource::Fixed(accrued),
            },
        );
    }

    let schedule_end = params.payment_start + params.years * DAYS_PER_YEAR;
    let payment = monthly_payment(capitalized_principal, params.rate, params.years);

    store.append_descriptor(
        debt,
        Descriptor::R {
            direction: Direction::In,
            growth: debt,
            t0: params.payment_start + MONTHLY_PAYMENT_FREQUENCY_DAYS,
            dt: MONTHLY_PAYMENT_FREQUENCY_DAYS,
            tf: schedule_end,
            value: ValueSource::Fixed(payment),
        },
    );
    store.append_descriptor(
        cash,
        Descriptor::R {
            direction: Direction::In,
            growth: cash,
            t0: params.payment_start + MONTHLY_PAYMENT_FREQUENCY_DAYS,
            dt: MONTHLY_PAYMENT_FREQUENCY_DAYS,
            tf: schedule_end,
            value: ValueSource::Fixed(payment),
        },
    );

    // Same stage-10 `LazyCorrection` / stage-30 cross-envelope-read split
    // as `compile_amortizing_debt` above.
    store.append_descriptor(
        debt,
        Descriptor::LazyCorrection {
            t_k: schedule_end,
            target: 0.0,
        },
    );
    store.append_descriptor(
        cash,
        Descriptor::LazyFromEnvelopes {
            t_k: schedule_end,
            compute: Box::new(move |reader, index| reader.value_at(debt, index.saturating_sub(1))),
        },
    );
    Ok(())
}
