//! `transfer_money`, `roth_ira_contribution`, `invest_money`,
//! `high_yield_savings_account`, and `retirement`: a paired outflow from
//! `from` and inflow to `to`, each leg gated independently by its own
//! `event_functions` flag.

use crate::error::SimulationError;
use crate::model::{Descriptor, Direction, EnvelopeStore, Event, TransferParams, ValueSource};

use super::flows::{amount_param_fn, keyed};
use super::require_envelope;

const DEFAULT_FREQUENCY_DAYS: f64 = 30.4375;

pub fn compile_transfer(event: &Event, params: &TransferParams, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    let amount = amount_param_fn(params.amount, &event.updating_events);

    if event.enabled("Outflow enabled") {
        let from = require_envelope(store, event, &params.from)?;
        append_leg(store, from, Direction::Out, params, amount.clone());
    }
    if event.enabled("Inflow enabled") {
        let to = require_envelope(store, event, &params.to)?;
        append_leg(store, to, Direction::In, params, amount);
    }
    Ok(())
}

fn append_leg(
    store: &mut EnvelopeStore,
    envelope: crate::model::EnvelopeKey,
    direction: Direction,
    params: &TransferParams,
    amount: crate::model::ParamFn,
) {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::GrowthModel;
    use crate::model::EventId;
    use crate::model::EventKind;
    use std::collections::HashMap;

    fn transfer_event(params: TransferParams) -> Event {
        Event {
            id: EventId(0),
            kind: EventKind::TransferMoney(params),
            event_functions: HashMap::new(),
            updating_events: Vec::new(),
        }
    }

    #[test]
    fn both_legs_appended_when_both_enabled() {
        let mut store = EnvelopeStore::new();
        let checking = store.declare("Checking", "bank", GrowthModel::None);
        let savings = store.declare("Savings", "bank", GrowthModel::None);
        let event = transfer_event(TransferParams {
            from: "Checking".into(),
            to: "Savings".into(),
            amount: 500.0,
            start_time: 0.0,
            is_recurring: false,
            end_time: None,
            frequency_days: None,
        });
        compile_transfer(
            &event,
            match &event.kind {
                EventKind::TransferMoney(p) => p,
                _ => unreachable!(),
            },
            &mut store,
        )
        .unwrap();
        assert_eq!(store.get(checking).descriptors.len(), 1);
        assert_eq!(store.get(savings).descriptors.len(), 1);
        matches!(store.get(checking).descriptors[0], Descriptor::T { direction: Direction::Out, .. });
        matches!(store.get(savings).descriptors[0], Descriptor::T { direction: Direction::In, .. });
    }

    #[test]
    fn disabled_outflow_leg_skips_source() {
        let mut store = EnvelopeStore::new();
        let checking = store.declare("Checking", "bank", GrowthModel::None);
        let savings = store.declare("Savings", "bank", GrowthModel::None);
        let mut event = transfer_event(TransferParams {
            from: "Checking".into(),
            to: "Savings".into(),
            amount: 500.0,
            start_time: 0.0,
            is_recurring: false,
            end_time: None,
            frequency_days: None,
        });
        event.event_functions.insert("Outflow enabled".into(), false);
        compile_transfer(
            &event,
            match &event.kind {
                EventKind::TransferMoney(p) => p,
                _ => unreachable!(),
            },
            &mut store,
        )
        .unwrap();
        assert!(store.get(checking).descriptors.is_empty());
        assert_eq!(store.get(savings).descriptors.len(), 1);
    }
}
