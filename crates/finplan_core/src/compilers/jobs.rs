//! `get_job` and `get_wage_job`: a recurring paycheck into the cash
//! envelope plus parallel recurring flows into taxable income,
//! federal/state/local withholdings, and 401(k) contribution (employer
//! match included). Updating sub-events (`get_a_raise`,
//! `change_401k_contribution`, `change_hours`, `change_employer_match`,
//! `reoccurring_raise`, `get_a_bonus`) fold into the paycheck's `Θ` via
//! `γ`, or append an extra one-shot `T` for bonuses.

use crate::error::SimulationError;
use crate::model::{
    Descriptor, Direction, EnvelopeKey, EnvelopeStore, Event, EventKind, JobParams, ParamFn, Theta, ThetaTemplate,
    ValueSource, WageJobParams, LOCAL_FLAT_RATE, STATE_FLAT_RATE,
};

use super::{opt_envelope, require_envelope};

/// `theta.get("base") * theta.get("rate")`, shared by every paycheck-derived
/// recurring flow (the deposit itself uses `rate = 1`).
fn f_scaled(theta: &Theta, _dt: f64) -> f64 {
    theta.get("base") * theta.get("rate")
}

fn job_paycheck_fn(params: &JobParams, updating_events: &[Event]) -> ParamFn {
    let scale = params.pay_frequency_days / 365.25;
    let base = params.salary * scale;
    let mut current = ParamFn::constant(base);
    for update in updating_events {
        current = match &update.kind {
            EventKind::GetARaise(p) => current.gamma(p.at_time, ParamFn::constant(p.new_salary * scale)),
            EventKind::ReoccurringRaise(p) => current.gamma(
                p.start_time,
                ParamFn::percent_step_adjust(base, p.pct, p.period_days, p.start_time, p.end_time),
            ),
            _ => current,
        };
    }
    current
}

fn wage_paycheck_fn(params: &WageJobParams, updating_events: &[Event]) -> ParamFn {
    let scale = params.pay_frequency_days / 7.0;
    let base = params.hourly_rate * params.hours_per_week * scale;
    let mut current = ParamFn::constant(base);
    for update in updating_events {
        current = match &update.kind {
            EventKind::ChangeHours(p) => {
                current.gamma(p.at_time, ParamFn::constant(params.hourly_rate * p.new_hours * scale))
            }
            EventKind::ReoccurringRaise(p) => current.gamma(
                p.start_time,
                ParamFn::percent_step_adjust(base, p.pct, p.period_days, p.start_time, p.end_time),
            ),
            _ => current,
        };
    }
    current
}

fn contribution_pct_fn(base_pct: f64, updating_events: &[Event]) -> ParamFn {
    let mut current = ParamFn::constant(base_pct);
    for update in updating_events {
        if let EventKind::Change401kContribution(p) = &update.kind {
            current = current.gamma(p.at_time, ParamFn::constant(p.new_pct));
        }
    }
    current
}

fn employer_match_pct_fn(base_pct: f64, updating_events: &[Event]) -> ParamFn {
    let mut current = ParamFn::constant(base_pct);
    for update in updating_events {
        if let EventKind::ChangeEmployerMatch(p) = &update.kind {
            current = current.gamma(p.at_time, ParamFn::constant(p.new_pct));
        }
    }
    current
}

fn scaled_flow(growth: EnvelopeKey, t0: f64, dt: f64, tf: f64, base: ParamFn, rate: ParamFn) -> Descriptor {
    let theta = ThetaTemplate::new().with("base", base).with("rate", rate);
    Descriptor::R {
        direction: Direction::In,
        growth,
        t0,
        dt,
        tf,
        value: ValueSource::Computed { theta, compute: f_scaled },
    }
}

/// Appends the cash paycheck plus every optional parallel flow that has a
/// target envelope declared; targets left `None` are silently skipped.
#[allow(clippy::too_many_arguments)]
fn emit_paycheck_flows(
    store: &mut EnvelopeStore,
    cash: EnvelopeKey,
    taxable_income: Option<EnvelopeKey>,
    federal_withholdings: Option<EnvelopeKey>,
    state_withholdings: Option<EnvelopeKey>,
    local_withholdings: Option<EnvelopeKey>,
    p_401k: Option<EnvelopeKey>,
    paycheck: ParamFn,
    federal_withholding_pct: f64,
    contribution_pct: ParamFn,
    employer_match_pct: ParamFn,
    start_time: f64,
    end_time: f64,
    pay_frequency_days: f64,
) {
    let one = ParamFn::constant(1.0);
    store.append_descriptor(
        cash,
        scaled_flow(cash, start_time, pay_frequency_days, end_time, paycheck.clone(), one.clone()),
    );
    if let Some(ti) = taxable_income {
        store.append_descriptor(
            ti,
            scaled_flow(ti, start_time, pay_frequency_days, end_time, paycheck.clone(), one),
        );
    }
    if let Some(fw) = federal_withholdings {
        store.append_descriptor(
            fw,
            scaled_flow(
                fw,
                start_time,
                pay_frequency_days,
                end_time,
                paycheck.clone(),
                ParamFn::constant(federal_withholding_pct),
            ),
        );
    }
    if let Some(sw) = state_withholdings {
        store.append_descriptor(
            sw,
            scaled_flow(
                sw,
                start_time,
                pay_frequency_days,
                end_time,
                paycheck.clone(),
                ParamFn::constant(STATE_FLAT_RATE),
            ),
        );
    }
    if let Some(lw) = local_withholdings {
        store.append_descriptor(
            lw,
            scaled_flow(
                lw,
                start_time,
                pay_frequency_days,
                end_time,
                paycheck.clone(),
                ParamFn::constant(LOCAL_FLAT_RATE),
            ),
        );
    }
    if let Some(p401k) = p_401k {
        store.append_descriptor(
            p401k,
            scaled_flow(p401k, start_time, pay_frequency_days, end_time, paycheck.clone(), contribution_pct),
        );
        store.append_descriptor(
            p401k,
            scaled_flow(p401k, start_time, pay_frequency_days, end_time, paycheck, employer_match_pct),
        );
    }
}

fn emit_bonuses(store: &mut EnvelopeStore, cash: EnvelopeKey, taxable_income: Option<EnvelopeKey>, updating_events: &[Event]) {
    for update in updating_events {
        if let EventKind::GetABonus(p) = &update.kind {
            store.append_descriptor(
                cash,
                Descriptor::T {
                    direction: Direction::In,
                    growth: cash,
                    t_k: p.at_time,
                    t0: p.at_time,
                    value: ValueSource::Fixed(p.amount),
                },
            );
            if let Some(ti) = taxable_income {
                store.append_descriptor(
                    ti,
                    Descriptor::T {
                        direction: Direction::In,
                        growth: ti,
                        t_k: p.at_time,
                        t0: p.at_time,
                        value: ValueSource::Fixed(p.amount),
                    },
                );
            }
        }
    }
}

pub fn compile_get_job(event: &Event, params: &JobParams, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    if !event.enabled("Inflow enabled") {
        return Ok(());
    }
    let cash = require_envelope(store, event, &params.cash_envelope)?;
    let taxable_income = opt_envelope(store, &params.taxable_income_envelope);
    let federal_withholdings = opt_envelope(store, &params.federal_withholdings_envelope);
    let state_withholdings = opt_envelope(store, &params.state_withholdings_envelope);
    let local_withholdings = opt_envelope(store, &params.local_withholdings_envelope);
    let p_401k = opt_envelope(store, &params.p_401k_envelope);

    let paycheck = job_paycheck_fn(params, &event.updating_events);
    let contribution_pct = contribution_pct_fn(params.p_401k_contribution_pct, &event.updating_events);
    let employer_match_pct = employer_match_pct_fn(params.employer_match_pct, &event.updating_events);

    emit_paycheck_flows(
        store,
        cash,
        taxable_income,
        federal_withholdings,
        state_withholdings,
        local_withholdings,
        p_401k,
        paycheck,
        params.federal_withholding_pct,
        contribution_pct,
        employer_match_pct,
        params.start_time,
        params.end_time.unwrap_or(f64::INFINITY),
        params.pay_frequency_days,
    );
    emit_bonuses(store, cash, taxable_income, &event.updating_events);
    Ok(())
}

pub fn compile_get_wage_job(event: &Event, params: &WageJobParams, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    if !event.enabled("Inflow enabled") {
        return Ok(());
    }
    let cash = require_envelope(store, event, &params.cash_envelope)?;
    let taxable_income = opt_envelope(store, &params.taxable_income_envelope);
    let federal_withholdings = opt_envelope(store, &params.federal_withholdings_envelope);
    let state_withholdings = opt_envelope(store, &params.state_withholdings_envelope);
    let local_withholdings = opt_envelope(store, &params.local_withholdings_envelope);
    let p_401k = opt_envelope(store, &params.p_401k_envelope);

    let paycheck = wage_paycheck_fn(params, &event.updating_events);
    let contribution_pct = contribution_pct_fn(params.p_401k_contribution_pct, &event.updating_events);
    let employer_match_pct = employer_match_pct_fn(params.employer_match_pct, &event.updating_events);

    emit_paycheck_flows(
        store,
        cash,
        taxable_income,
        federal_withholdings,
        state_withholdings,
        local_withholdings,
        p_401k,
        paycheck,
        params.federal_withholding_pct,
        contribution_pct,
        employer_match_pct,
        params.start_time,
        params.end_time.unwrap_or(f64::INFINITY),
        params.pay_frequency_days,
    );
    emit_bonuses(store, cash, taxable_income, &event.updating_events);
    Ok(())
}
