//! `have_kid`, `marriage`, `divorce`, `start_business`,
//! `buy_home_insurance`, `buy_health_insurance`, `buy_life_insurance` (all
//! compiled as a plain outflow `FlowParams`), and `pass_away`.

use crate::error::SimulationError;
use crate::model::{Descriptor, Direction, EnvelopeStore, Event, FlowParams, PassAwayParams};

use super::flows::compile_flow;

/// Every life event in this category shares `FlowParams`'s shape; `compile_flow`
/// already implements the one-shot/recurring outflow logic they all need.
pub fn compile_flow_like(event: &Event, params: &FlowParams, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    compile_flow(event, params, Direction::Out, store)
}

/// Iterates every declared envelope and drives it to zero the day after
/// `death_time`.
pub fn compile_pass_away(params: &PassAwayParams, store: &mut EnvelopeStore) -> Result<(), SimulationError> {
    let t_k = params.death_time + 1.0;
    for key in store.keys().collect::<Vec<_>>() {
        store.append_descriptor(key, Descriptor::LazyCorrection { t_k, target: 0.0 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::GrowthModel;
    use crate::model::EventId;
    use crate::model::EventKind;
    use std::collections::HashMap;

    #[test]
    fn pass_away_queues_a_correction_on_every_envelope() {
        let mut store = EnvelopeStore::new();
        let cash = store.declare("Cash", "bank", GrowthModel::None);
        let debt = store.declare("Debt", "loan", GrowthModel::None);
        compile_pass_away(&PassAwayParams { death_time: 1000.0 }, &mut store).unwrap();
        assert_eq!(store.get(cash).descriptors.len(), 1);
        assert_eq!(store.get(debt).descriptors.len(), 1);
        matches!(store.get(cash).descriptors[0], Descriptor::LazyCorrection { t_k: 1001.0, target: 0.0 });
    }

    #[test]
    fn have_kid_compiles_as_a_plain_outflow() {
        let mut store = EnvelopeStore::new();
        let cash = store.declare("Cash", "bank", GrowthModel::None);
        let event = Event {
            id: EventId(0),
            kind: EventKind::HaveKid(FlowParams {
                envelope: "Cash".into(),
                amount: 15_000.0,
                start_time: 0.0,
                is_recurring: false,
                end_time: None,
                frequency_days: None,
            }),
            event_functions: HashMap::new(),
            updating_events: Vec::new(),
        };
        compile_flow_like(
            &event,
            match &event.kind {
                EventKind::HaveKid(p) => p,
                _ => unreachable!(),
            },
            &mut store,
        )
        .unwrap();
        assert_eq!(store.get(cash).descriptors.len(), 1);
        matches!(store.get(cash).descriptors[0], Descriptor::T { direction: Direction::Out, .. });
    }
}
