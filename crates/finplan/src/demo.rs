//! A small, self-contained plan for `finplan --demo`, so the CLI has
//! something to run without a plan file on hand. Built with
//! [`finplan_core::builder::PlanBuilder`] instead of hand-authored YAML —
//! the fluent DSL SPEC_FULL.md's ambient-configuration section calls for,
//! grounded on the teacher's own `SimulationBuilder` example in
//! `config/builder.rs`.

use finplan_core::builder::{demo_schema, EnvelopeBuilder, PlanBuilder};
use finplan_core::growth::GrowthModel;
use finplan_core::model::{Plan, Schema};

/// Paycheck into `Cash`, a transfer skimmed into a growing `Savings`
/// envelope every month, over two years.
pub fn build_demo_plan() -> (Plan, Schema) {
    let plan = PlanBuilder::new(1990, 1, 1)
        .envelope(EnvelopeBuilder::bank("Cash"))
        .envelope(EnvelopeBuilder::new("Savings").category("savings").growth(GrowthModel::YearlyCompound { rate: 0.04 }))
        .recurring_inflow("Cash", 4000.0, 0.0, 730.0, 30.4375)
        .event(finplan_core::model::EventKind::TransferMoney(finplan_core::model::TransferParams {
            from: "Cash".into(),
            to: "Savings".into(),
            amount: 500.0,
            start_time: 0.0,
            is_recurring: true,
            end_time: Some(730.0),
            frequency_days: Some(30.4375),
        }))
        .build();

    (plan, demo_schema())
}
