//! Event compilers: one pure `(event, envelopes) → void` function per event
//! kind, grouped by category the way the teacher's `evaluate_effect` groups
//! `EventEffect` handling. `compile_event` below is the exhaustive
//! dispatcher — a new `EventKind` variant with no matching arm is a compile
//! error.

pub mod flows;
pub mod jobs;
pub mod life_events;
pub mod loans;
pub mod tax_system;
pub mod transfers;

use crate::error::{CompileError, SimulationError};
use crate::model::{Direction, EnvelopeKey, EnvelopeStore, Event, EventKind, Plan};

/// Compile every envelope declaration and every top-level event of `plan`
/// into a fresh `EnvelopeStore`. `start_day`/`end_day` are the simulation's
/// overall day range (days since `plan.birth_date`); only
/// `tax_system::compile_tax_system` consumes them, to lay down one
/// reconciliation per calendar year the run covers.
pub fn compile_plan(plan: &Plan, start_day: f64, end_day: f64) -> Result<EnvelopeStore, SimulationError> {
    let mut store = EnvelopeStore::new();
    for spec in &plan.envelopes {
        let key = store.declare(&spec.name, &spec.category, spec.growth);
        spec.growth
            .validate()
            .map_err(|source| CompileError::InvalidGrowthParameter { envelope: key, source })?;
    }
    for event in &plan.events {
        compile_event(event, &mut store, plan, start_day, end_day)?;
    }
    tracing::debug!(envelopes = store.len(), events = plan.events.len(), "plan compiled");
    Ok(store)
}

fn compile_event(
    event: &Event,
    store: &mut EnvelopeStore,
    plan: &Plan,
    start_day: f64,
    end_day: f64,
) -> Result<(), SimulationError> {
    match &event.kind {
        EventKind::Inflow(p) => flows::compile_flow(event, p, Direction::In, store),
        EventKind::Outflow(p) => flows::compile_flow(event, p, Direction::Out, store),
        EventKind::Gift(p) => flows::compile_flow(event, p, Direction::In, store),
        EventKind::Purchase(p) => flows::compile_flow(event, p, Direction::Out, store),
        EventKind::BuyGroceries(p) => flows::compile_flow(event, p, Direction::Out, store),
        EventKind::ReceiveGovernmentAid(p) => flows::compile_flow(event, p, Direction::In, store),
        EventKind::ReoccuringSpendingInflationAdjusted(p) => {
            flows::compile_inflation_adjusted(event, p, plan, store)
        }
        EventKind::MonthlyBudgeting(p) => flows::compile_monthly_budgeting(event, p, plan, store),
        EventKind::ManualCorrection(p) => flows::compile_manual_correction(p, store),

        EventKind::TransferMoney(p)
        | EventKind::RothIraContribution(p)
        | EventKind::InvestMoney(p)
        | EventKind::HighYieldSavingsAccount(p)
        | EventKind::Retirement(p) => transfers::compile_transfer(event, p, store),

        EventKind::Loan(p) | EventKind::BuyHouse(p) | EventKind::BuyCar(p) => {
            loans::compile_loan(event, p, store)
        }
        EventKind::FederalSubsidizedLoan(p) => loans::compile_student_loan(event, p, store, true),
        EventKind::FederalUnsubsidizedLoan(p) | EventKind::PrivateStudentLoan(p) => {
            loans::compile_student_loan(event, p, store, false)
        }

        EventKind::GetJob(p) => jobs::compile_get_job(event, p, store),
        EventKind::GetWageJob(p) => jobs::compile_get_wage_job(event, p, store),

        EventKind::HaveKid(p)
        | EventKind::Marriage(p)
        | EventKind::Divorce(p)
        | EventKind::StartBusiness(p)
        | EventKind::BuyHomeInsurance(p)
        | EventKind::BuyHealthInsurance(p)
        | EventKind::BuyLifeInsurance(p) => life_events::compile_flow_like(event, p, store),
        EventKind::PassAway(p) => life_events::compile_pass_away(p, store),

        EventKind::UsaTaxSystem(p) => tax_system::compile_tax_system(event, p, plan, store, start_day, end_day),

        // Updating sub-events are read out of `event.updating_events` by
        // their parent's compiler; they never dispatch standalone.
        EventKind::UpdateAmount(_)
        | EventKind::StepAmount(_)
        | EventKind::GetARaise(_)
        | EventKind::Change401kContribution(_)
        | EventKind::ChangeHours(_)
        | EventKind::ChangeEmployerMatch(_)
        | EventKind::ReoccurringRaise(_)
        | EventKind::GetABonus(_) => Ok(()),
    }
}

/// Look up a required envelope by name, turning a miss into the
/// abort-worthy `CompileError::MissingRequiredEnvelope`.
pub(crate) fn require_envelope(store: &EnvelopeStore, event: &Event, name: &str) -> Result<EnvelopeKey, SimulationError> {
    store.require(event.id, name)
}

/// Look up an optional envelope by name; silently does nothing on a miss —
/// non-required targets are skipped, not fatal.
pub(crate) fn opt_envelope(store: &EnvelopeStore, name: &Option<String>) -> Option<EnvelopeKey> {
    name.as_deref().and_then(|n| store.key(n))
}
