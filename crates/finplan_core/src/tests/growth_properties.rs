//! End-to-end growth-kernel checks against the full `run_simulation`
//! pipeline (unit-level `f_growth` checks live in `growth.rs` itself;
//! these confirm the kernel is actually wired through compile → evaluate).

use crate::builder::{demo_schema, EnvelopeBuilder, PlanBuilder};
use crate::growth::GrowthModel;
use crate::simulation::run_simulation;

/// spec.md §8 scenario 3: a single inflow into a Yearly-Compound envelope.
#[test]
fn scenario_3_yearly_compound_inflow_matches_closed_form() {
    let plan = PlanBuilder::new(1990, 1, 1)
        .envelope(EnvelopeBuilder::bank("Cash").growth(GrowthModel::YearlyCompound { rate: 0.05 }))
        .inflow("Cash", 100.0, 0.0)
        .build();

    let outcome = run_simulation(&plan, &demo_schema(), 0.0, 730.0, 365.0, None);
    assert!(outcome.error.is_none());
    let values: Vec<f64> = outcome.result.points.iter().map(|p| p.value).collect();
    assert_eq!(values.len(), 3);
    assert!((values[0] - 100.0).abs() < 1e-6);
    assert!((values[1] - 100.0 * 1.05f64.powf(365.0 / 365.25)).abs() < 1e-6);
    assert!((values[2] - 100.0 * 1.05f64.powf(730.0 / 365.25)).abs() < 1e-6);
}

/// Step function: a one-shot `T` contributes nothing before `t_k`, and its
/// contribution is monotone non-decreasing afterward for a non-negative
/// growth rate.
#[test]
fn one_shot_inflow_is_zero_before_start_and_grows_after() {
    let plan = PlanBuilder::new(1990, 1, 1)
        .envelope(EnvelopeBuilder::bank("Cash").growth(GrowthModel::DailyCompound { rate: 0.08 }))
        .inflow("Cash", 1_000.0, 100.0)
        .build();

    // interval=365.0 is the uniform-grid case (spec.md §4.3), giving three
    // evenly-spaced points: one before t_k=100, two after.
    let outcome = run_simulation(&plan, &demo_schema(), 0.0, 730.0, 365.0, None);
    assert!(outcome.error.is_none());
    let values: Vec<f64> = outcome.result.points.iter().map(|p| p.value).collect();
    assert_eq!(values.len(), 3);
    assert_eq!(values[0], 0.0);
    for pair in values[1..].windows(2) {
        assert!(pair[1] >= pair[0] - 1e-9, "{pair:?} not monotone");
    }
}

/// Growth identity: `None` growth never changes the contributed amount,
/// no matter how far past `t_k` the grid reaches.
#[test]
fn none_growth_holds_balance_flat_across_a_long_horizon() {
    let plan = PlanBuilder::new(1990, 1, 1)
        .envelope(EnvelopeBuilder::bank("Cash"))
        .inflow("Cash", 250.0, 0.0)
        .build();

    let outcome = run_simulation(&plan, &demo_schema(), 0.0, 30.0 * 365.25, 365.25, None);
    assert!(outcome.error.is_none());
    for point in &outcome.result.points {
        assert_eq!(point.value, 250.0);
    }
}
