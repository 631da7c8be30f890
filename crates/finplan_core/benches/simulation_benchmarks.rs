//! Criterion benchmarks for finplan_core simulation
//!
//! Run with: cargo bench -p finplan_core

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jiff::civil::date;

use finplan_core::model::{
    Dependents, EnvelopeSpec, Event, EventId, EventKind, FilingStatus, FlowParams, JobParams, Plan, Schema,
    TaxSystemParams, TransferParams,
};
use finplan_core::growth::GrowthModel;
use finplan_core::simulation::run_simulation;

fn schema() -> Schema {
    Schema {
        categories: vec!["bank".into(), "retirement".into(), "tax".into()],
        inflation_rate: 0.03,
    }
}

fn envelope(name: &str, category: &str, growth: GrowthModel) -> EnvelopeSpec {
    EnvelopeSpec {
        name: name.into(),
        category: category.into(),
        growth,
    }
}

fn flow_event(id: u32, envelope: &str, amount: f64, frequency_days: f64, end_time: f64) -> Event {
    Event {
        id: EventId(id),
        kind: EventKind::Inflow(FlowParams {
            envelope: envelope.into(),
            amount,
            start_time: 0.0,
            is_recurring: true,
            end_time: Some(end_time),
            frequency_days: Some(frequency_days),
        }),
        event_functions: HashMap::new(),
        updating_events: Vec::new(),
    }
}

/// A single job + transfers between checking/savings, the way a typical
/// multi-decade plan is actually shaped.
fn job_and_transfer_plan(years: f64) -> Plan {
    let end = years * 365.25;
    let job_event = Event {
        id: EventId(1),
        kind: EventKind::GetJob(JobParams {
            cash_envelope: "Checking".into(),
            taxable_income_envelope: Some("TaxableIncome".into()),
            federal_withholdings_envelope: Some("FederalWithholdings".into()),
            state_withholdings_envelope: Some("StateWithholdings".into()),
            local_withholdings_envelope: Some("LocalWithholdings".into()),
            p_401k_envelope: Some("P401k".into()),
            salary: 95_000.0,
            p_401k_contribution_pct: 0.06,
            employer_match_pct: 0.03,
            pay_frequency_days: 14.0,
            federal_withholding_pct: 0.15,
            start_time: 0.0,
            end_time: Some(end),
        }),
        event_functions: HashMap::new(),
        updating_events: Vec::new(),
    };
    let transfer_event = Event {
        id: EventId(2),
        kind: EventKind::TransferMoney(TransferParams {
            from: "Checking".into(),
            to: "Savings".into(),
            amount: 500.0,
            start_time: 0.0,
            is_recurring: true,
            end_time: Some(end),
            frequency_days: Some(30.4375),
        }),
        event_functions: HashMap::new(),
        updating_events: Vec::new(),
    };

    Plan {
        birth_date: date(1990, 1, 1),
        adjust_for_inflation: false,
        inflation_rate: 0.03,
        filing_status: FilingStatus::Single,
        dependents: Dependents(0),
        location: "US".into(),
        envelopes: vec![
            envelope("Checking", "bank", GrowthModel::None),
            envelope("Savings", "bank", GrowthModel::YearlyCompound { rate: 0.04 }),
            envelope("TaxableIncome", "tax", GrowthModel::None),
            envelope("FederalWithholdings", "tax", GrowthModel::None),
            envelope("StateWithholdings", "tax", GrowthModel::None),
            envelope("LocalWithholdings", "tax", GrowthModel::None),
            envelope("P401k", "retirement", GrowthModel::YearlyCompound { rate: 0.07 }),
        ],
        events: vec![job_event, transfer_event],
    }
}

/// The same plan plus `usa_tax_system`, to exercise the staged resolver's
/// three passes over decades of year-end reconciliations.
fn plan_with_tax_system(years: f64) -> Plan {
    let mut plan = job_and_transfer_plan(years);
    for name in [
        "P401kWithdraw",
        "P401kWithdrawWithholding",
        "Penalty401k",
        "Taxes401k",
        "Roth",
        "PenaltyRoth",
        "RothIraPrinciple",
        "RothIraWithdraw",
        "ShortTermCapitalGains",
        "LongTermCapitalGains",
        "IraContributions",
        "IrsRegisteredAccount",
    ] {
        plan.envelopes.push(envelope(name, "tax", GrowthModel::None));
    }
    plan.events.push(Event {
        id: EventId(3),
        kind: EventKind::UsaTaxSystem(TaxSystemParams {
            taxable_income: "TaxableIncome".into(),
            federal_withholdings: "FederalWithholdings".into(),
            state_withholdings: "StateWithholdings".into(),
            local_withholdings: "LocalWithholdings".into(),
            ira_contributions: "IraContributions".into(),
            p_401k: "P401k".into(),
            p_401k_withdraw: "P401kWithdraw".into(),
            p_401k_withdraw_withholding: "P401kWithdrawWithholding".into(),
            penalty_401k: "Penalty401k".into(),
            taxes_401k: "Taxes401k".into(),
            roth: "Roth".into(),
            penalty_roth: "PenaltyRoth".into(),
            roth_ira_principle: "RothIraPrinciple".into(),
            roth_ira_withdraw: "RothIraWithdraw".into(),
            short_term_capital_gains: "ShortTermCapitalGains".into(),
            long_term_capital_gains: "LongTermCapitalGains".into(),
            irs_registered_account: "IrsRegisteredAccount".into(),
        }),
        event_functions: HashMap::new(),
        updating_events: Vec::new(),
    });
    plan
}

fn bench_job_and_transfer_30yr(c: &mut Criterion) {
    let plan = job_and_transfer_plan(30.0);
    let schema = schema();
    let end = 30.0 * 365.25;

    c.bench_function("job_and_transfer_30yr_daily_grid", |b| {
        b.iter(|| run_simulation(black_box(&plan), black_box(&schema), 0.0, black_box(end), 1.0, None))
    });
}

fn bench_tax_system_across_grid_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("tax_system_grid_density");
    let plan = plan_with_tax_system(40.0);
    let schema = schema();
    let end = 40.0 * 365.25;

    for interval in [365.0, 30.4375, 1.0] {
        group.bench_with_input(BenchmarkId::new("interval_days", interval as u32), &interval, |b, &interval| {
            b.iter(|| run_simulation(black_box(&plan), black_box(&schema), 0.0, black_box(end), interval, None))
        });
    }

    group.finish();
}

fn bench_event_count_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_count_scaling");
    let schema = schema();
    let end = 10.0 * 365.25;

    for flow_count in [5usize, 25, 100] {
        let mut plan = job_and_transfer_plan(10.0);
        for i in 0..flow_count {
            plan.events.push(flow_event(100 + i as u32, "Savings", 50.0, 30.4375, end));
        }
        group.bench_with_input(BenchmarkId::new("flows", flow_count), &plan, |b, plan| {
            b.iter(|| run_simulation(black_box(plan), black_box(&schema), 0.0, black_box(end), 30.4375, None))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_job_and_transfer_30yr,
    bench_tax_system_across_grid_density,
    bench_event_count_scaling,
);
criterion_main!(benches);
