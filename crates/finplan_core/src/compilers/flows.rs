//! `inflow`, `outflow`, `gift`, `purchase`, `buy_groceries`,
//! `receive_government_aid`, `reoccuring_spending_inflation_adjusted`,
//! `monthly_budgeting`, and `manual_correction`.

use crate::error::SimulationError;
use crate::model::{
    Descriptor, Direction, EnvelopeStore, Event, EventKind, FlowParams, InflationAdjustedFlowParams,
    ManualCorrectionParams, MonthlyBudgetingParams, ParamFn, Plan, ThetaTemplate, ValueSource,
};

use super::require_envelope;

const DEFAULT_FREQUENCY_DAYS: f64 = 30.4375;

/// Fold `UpdateAmount`/`StepAmount` updating sub-events into a single
/// `ParamFn` for the "amount" field via `γ`.
pub(crate) fn amount_param_fn(base_amount: f64, updating_events: &[Event]) -> ParamFn {
    let mut current = ParamFn::constant(base_amount);
    for update in updating_events {
        current = match &update.kind {
            EventKind::UpdateAmount(p) => current.gamma(p.at_time, ParamFn::constant(p.new_amount)),
            EventKind::StepAmount(p) => current.gamma(
                p.start_time,
                ParamFn::step_adjust(base_amount, p.delta, p.period_days, p.start_time, p.end_time),
            ),
            _ => current,
        };
    }
    current
}

/// Wrap a single `ParamFn` as a `ValueSource::Keyed` under both `"a"` and
/// `"b"`, so it resolves regardless of the descriptor's direction.
pub(crate) fn keyed(amount: ParamFn) -> ValueSource {
    ValueSource::Keyed(ThetaTemplate::new().with("a", amount.clone()).with("b", amount))
}

pub fn compile_flow(event: &Event, params: &FlowParams, direction: Direction, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    let flag = match direction {
        Direction::In => "Inflow enabled",
        Direction::Out => "Outflow enabled",
    };
    if !event.enabled(flag) {
        return Ok(());
    }
    let envelope = require_envelope(store, event, &params.envelope)?;
    let amount = amount_param_fn(params.amount, &event.updating_events);

    let descriptor = if params.is_recurring {
        Descriptor::R {
            direction,
            growth: envelope,
            t0: params.start_time,
            dt: params.frequency_days.unwrap_or(DEFAULT_FREQUENCY_DAYS),
            tf: params.end_time.unwrap_or(f64::INFINITY),
            value: keyed(amount),
        }
    } else {
        Descriptor::T {
            direction,
            growth: envelope,
            t_k: params.start_time,
            t0: params.start_time,
            value: keyed(amount),
        }
    };
    store.append_descriptor(envelope, descriptor);
    Ok(())
}

pub fn compile_inflation_adjusted(
    event: &Event,
    params: &InflationAdjustedFlowParams,
    plan: &Plan,
    store: &mut EnvelopeStore,
) -> Result<(), SimulationError> {
    if !event.enabled("Outflow enabled") {
        return Ok(());
    }
    let envelope = require_envelope(store, event, &params.envelope)?;
    let amount = ParamFn::inflation_adjust(params.amount, plan.inflation_rate, params.start_time);
    store.append_descriptor(
        envelope,
        Descriptor::R {
            direction: Direction::Out,
            growth: envelope,
            t0: params.start_time,
            dt: params.frequency_days,
            tf: params.end_time,
            value: keyed(amount),
        },
    );
    Ok(())
}

pub fn compile_monthly_budgeting(
    event: &Event,
    params: &MonthlyBudgetingParams,
    plan: &Plan,
    store: &mut EnvelopeStore,
) -> Result<(), SimulationError> {
    if !event.enabled("Outflow enabled") {
        return Ok(());
    }
    let envelope = require_envelope(store, event, &params.from)?;
    let amount = if params.inflation_adjusted {
        ParamFn::inflation_adjust(params.housing, plan.inflation_rate, params.start_time)
    } else {
        ParamFn::constant(params.housing)
    };
    store.append_descriptor(
        envelope,
        Descriptor::R {
            direction: Direction::Out,
            growth: envelope,
            t0: params.start_time,
            dt: params.frequency_days,
            tf: params.end_time,
            value: keyed(amount),
        },
    );
    Ok(())
}

/// `manual_correction`: forces an envelope's running total to `amount` at
/// `start_time`.
pub fn compile_manual_correction(params: &ManualCorrectionParams, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    if let Some(envelope) = store.key(&params.envelope) {
        store.append_descriptor(
            envelope,
            Descriptor::LazyCorrection {
                t_k: params.start_time,
                target: params.amount,
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::GrowthModel;
    use crate::model::EventId;
    use std::collections::HashMap;

    fn flow_event(params: FlowParams) -> Event {
        Event {
            id: EventId(0),
            kind: EventKind::Inflow(params),
            event_functions: HashMap::new(),
            updating_events: Vec::new(),
        }
    }

    #[test]
    fn disabled_inflow_flag_appends_nothing() {
        let mut store = EnvelopeStore::new();
        let cash = store.declare("Cash", "bank", GrowthModel::None);
        let mut event = flow_event(FlowParams {
            envelope: "Cash".into(),
            amount: 100.0,
            start_time: 0.0,
            is_recurring: false,
            end_time: None,
            frequency_days: None,
        });
        event.event_functions.insert("Inflow enabled".into(), false);
        compile_flow(&event, match &event.kind { EventKind::Inflow(p) => p, _ => unreachable!() }, Direction::In, &mut store).unwrap();
        assert!(store.get(cash).descriptors.is_empty());
    }

    #[test]
    fn missing_required_envelope_aborts() {
        let mut store = EnvelopeStore::new();
        let event = flow_event(FlowParams {
            envelope: "Nope".into(),
            amount: 100.0,
            start_time: 0.0,
            is_recurring: false,
            end_time: None,
            frequency_days: None,
        });
        let err = compile_flow(&event, match &event.kind { EventKind::Inflow(p) => p, _ => unreachable!() }, Direction::In, &mut store);
        assert!(err.is_err());
    }

    #[test]
    fn manual_correction_emits_lazy_correction() {
        let mut store = EnvelopeStore::new();
        let cash = store.declare("Cash", "bank", GrowthModel::None);
        compile_manual_correction(
            &ManualCorrectionParams {
                envelope: "Cash".into(),
                amount: 5000.0,
                start_time: 365.0,
            },
            &mut store,
        )
        .unwrap();
        assert_eq!(store.get(cash).descriptors.len(), 1);
        matches!(store.get(cash).descriptors[0], Descriptor::LazyCorrection { .. });
    }
}
