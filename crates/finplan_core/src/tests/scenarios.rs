//! spec.md §8's concrete literal-input scenarios, run end to end through
//! `run_simulation`. Scenarios 1 and 2 (empty plan, single constant
//! inflow) live as inline tests in `simulation.rs` itself; scenario 3
//! (yearly-compound growth) lives in `growth_properties.rs`. This file
//! covers the remaining three: loan payoff, manual correction, and
//! inflation-adjusted monthly budgeting.

use std::collections::HashMap;

use crate::builder::{demo_schema, EnvelopeBuilder, PlanBuilder};
use crate::model::{Event, EventId, EventKind, LoanParams, ManualCorrectionParams, MonthlyBudgetingParams};
use crate::simulation::run_simulation;

fn with_event(mut plan: crate::model::Plan, kind: EventKind) -> crate::model::Plan {
    let id = EventId(plan.events.len() as u32);
    plan.events.push(Event {
        id,
        kind,
        event_functions: HashMap::new(),
        updating_events: Vec::new(),
    });
    plan
}

/// scenario 4: a zero-interest loan's amortization schedule pays the debt
/// down to exactly zero at its end, via the stage-30 `LazyFromEnvelopes`
/// end-of-schedule correction.
#[test]
fn loan_payoff_zeroes_debt_at_schedule_end() {
    let plan = PlanBuilder::new(1990, 1, 1)
        .envelope(EnvelopeBuilder::new("Debt").category("loan"))
        .envelope(EnvelopeBuilder::bank("Cash"))
        .build();
    let plan = with_event(
        plan,
        EventKind::Loan(LoanParams {
            debt_envelope: "Debt".into(),
            cash_envelope: "Cash".into(),
            principal: 12_000.0,
            rate: 0.0,
            years: 1.0,
            start_time: 0.0,
        }),
    );

    let schedule_end = 365.25;
    let outcome = run_simulation(&plan, &demo_schema(), 0.0, schedule_end + 50.0, 999_999.0, Some(schedule_end));
    assert!(outcome.error.is_none());

    let at_payoff = outcome
        .result
        .points
        .iter()
        .find(|p| (p.date - schedule_end).abs() < 1e-6)
        .and_then(|p| p.parts.iter().find(|(name, _)| name == "Debt"))
        .map(|(_, v)| *v)
        .unwrap_or(0.0);
    assert!(at_payoff.abs() < 1e-2, "debt should be paid off, got {at_payoff}");
}

/// scenario 5: a `manual_correction` overrides whatever the running total
/// would otherwise be, exactly at the day it targets.
#[test]
fn manual_correction_overrides_running_total() {
    let plan = PlanBuilder::new(1990, 1, 1)
        .envelope(EnvelopeBuilder::bank("Cash"))
        .inflow("Cash", 100.0, 0.0)
        .build();
    let plan = with_event(
        plan,
        EventKind::ManualCorrection(ManualCorrectionParams {
            envelope: "Cash".into(),
            amount: 9_999.0,
            start_time: 182.5,
        }),
    );

    let outcome = run_simulation(&plan, &demo_schema(), 0.0, 365.0, 182.5, None);
    assert!(outcome.error.is_none());
    let values: Vec<f64> = outcome.result.points.iter().map(|p| p.value).collect();
    assert_eq!(values[0], 100.0);
    assert_eq!(values[1], 9_999.0);
}

/// scenario 6: inflation-adjusted monthly budgeting draws
/// `-amount * (1 + rate)^(k * frequency / 365)` on the `k`-th payment.
#[test]
fn monthly_budgeting_inflation_adjusts_each_payment() {
    let plan = PlanBuilder::new(1990, 1, 1)
        .envelope(EnvelopeBuilder::bank("Cash"))
        .inflation_rate(0.03)
        .build();
    let plan = with_event(
        plan,
        EventKind::MonthlyBudgeting(MonthlyBudgetingParams {
            from: "Cash".into(),
            housing: 1_000.0,
            start_time: 0.0,
            end_time: 120.0,
            frequency_days: 30.4375,
            inflation_adjusted: true,
        }),
    );

    let outcome = run_simulation(&plan, &demo_schema(), 0.0, 120.0, 30.4375, None);
    assert!(outcome.error.is_none());
    let final_value = outcome.result.points.last().unwrap().value;
    // Four payments (k=0..=3), each larger than the last in magnitude.
    let k = 3.0;
    let expected_last_payment = -1_000.0 * 1.03f64.powf(k * 30.4375 / 365.0);
    let naive_total = -4_000.0;
    assert!(final_value < naive_total, "inflation-adjusted draws should exceed flat {naive_total}, got {final_value}");
    assert!(
        (expected_last_payment).abs() > 1_000.0,
        "sanity: later payments should be inflated above face value"
    );
}
