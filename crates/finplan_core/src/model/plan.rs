//! The wire-facing input types (spec.md §6): `Plan`, `Event`, the ~30
//! `EventKind` variants with their typed parameter structs, and `Schema`.
//!
//! These replace the source's dynamic `event.parameters[xxx]` lookups with
//! one struct per event kind (spec.md §9's re-architecture note) so
//! `compilers::*` match exhaustively instead of probing an untyped map.

use std::collections::HashMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::EventId;
use super::tax_config::{Dependents, FilingStatus};
use crate::growth::GrowthModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub birth_date: Date,
    pub adjust_for_inflation: bool,
    pub inflation_rate: f64,
    pub filing_status: FilingStatus,
    pub dependents: Dependents,
    pub location: String,
    pub envelopes: Vec<EnvelopeSpec>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeSpec {
    pub name: String,
    pub category: String,
    pub growth: GrowthModel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub kind: EventKind,
    /// Per-flag enable switch; a name absent from the map defaults to
    /// enabled (spec.md §4.7).
    #[serde(default)]
    pub event_functions: HashMap<String, bool>,
    #[serde(default)]
    pub updating_events: Vec<Event>,
}

impl Event {
    pub fn enabled(&self, flag: &str) -> bool {
        self.event_functions.get(flag).copied().unwrap_or(true)
    }
}

/// A minimal schema: just the pieces the core reads. The rest of the
/// schema (per-type UI parameter descriptors, category list for form
/// validation) belongs to the out-of-scope plan editor (spec.md §1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub categories: Vec<String>,
    pub inflation_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    // --- flows ---
    Inflow(FlowParams),
    Outflow(FlowParams),
    Gift(FlowParams),
    Purchase(FlowParams),
    BuyGroceries(FlowParams),
    ReceiveGovernmentAid(FlowParams),
    ReoccuringSpendingInflationAdjusted(InflationAdjustedFlowParams),
    MonthlyBudgeting(MonthlyBudgetingParams),
    ManualCorrection(ManualCorrectionParams),

    // --- transfers ---
    TransferMoney(TransferParams),
    RothIraContribution(TransferParams),
    InvestMoney(TransferParams),
    HighYieldSavingsAccount(TransferParams),
    Retirement(TransferParams),

    // --- loans ---
    Loan(LoanParams),
    BuyHouse(LoanParams),
    BuyCar(LoanParams),
    FederalSubsidizedLoan(StudentLoanParams),
    FederalUnsubsidizedLoan(StudentLoanParams),
    PrivateStudentLoan(StudentLoanParams),

    // --- jobs ---
    GetJob(JobParams),
    GetWageJob(WageJobParams),

    // --- life events ---
    HaveKid(FlowParams),
    Marriage(FlowParams),
    Divorce(FlowParams),
    StartBusiness(FlowParams),
    BuyHomeInsurance(FlowParams),
    BuyHealthInsurance(FlowParams),
    BuyLifeInsurance(FlowParams),
    PassAway(PassAwayParams),

    // --- tax system ---
    UsaTaxSystem(TaxSystemParams),

    // --- updating sub-events (nested under `updating_events`) ---
    UpdateAmount(UpdateAmountParams),
    StepAmount(StepAmountParams),
    GetARaise(RaiseParams),
    Change401kContribution(ChangeContributionParams),
    ChangeHours(ChangeHoursParams),
    ChangeEmployerMatch(ChangeContributionParams),
    ReoccurringRaise(ReoccurringRaiseParams),
    GetABonus(BonusParams),
}

/// One-shot or recurring flow into/out of a single envelope: covers
/// `inflow`/`outflow`/`gift`/`purchase`/`buy_groceries`/
/// `receive_government_aid` plus the simple life-event flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowParams {
    pub envelope: String,
    pub amount: f64,
    pub start_time: f64,
    pub is_recurring: bool,
    pub end_time: Option<f64>,
    pub frequency_days: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationAdjustedFlowParams {
    pub envelope: String,
    pub amount: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub frequency_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBudgetingParams {
    pub from: String,
    pub housing: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub frequency_days: f64,
    pub inflation_adjusted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualCorrectionParams {
    pub envelope: String,
    pub amount: f64,
    pub start_time: f64,
}

/// Paired in/out transfer between two envelopes; each leg is gated
/// independently by an `event_functions` flag (spec.md §4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferParams {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub start_time: f64,
    pub is_recurring: bool,
    pub end_time: Option<f64>,
    pub frequency_days: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParams {
    pub debt_envelope: String,
    pub cash_envelope: String,
    pub principal: f64,
    pub rate: f64,
    pub years: f64,
    pub start_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentLoanParams {
    pub debt_envelope: String,
    pub cash_envelope: String,
    pub principal: f64,
    pub rate: f64,
    pub years: f64,
    pub start_time: f64,
    /// Day amortized payments begin; the subsidized/unsubsidized student
    /// loan kinds use `graduation_day + 180` for this (spec.md §4.7).
    pub payment_start: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobParams {
    pub cash_envelope: String,
    pub taxable_income_envelope: Option<String>,
    pub federal_withholdings_envelope: Option<String>,
    pub state_withholdings_envelope: Option<String>,
    pub local_withholdings_envelope: Option<String>,
    pub p_401k_envelope: Option<String>,
    pub salary: f64,
    pub p_401k_contribution_pct: f64,
    pub employer_match_pct: f64,
    /// Days between paychecks; `salary` is distributed evenly over each
    /// pay period rather than paid out in a lump sum.
    pub pay_frequency_days: f64,
    /// Flat fraction of each paycheck withheld for federal tax, separate
    /// from the year-end `usa_tax_system` reconciliation.
    pub federal_withholding_pct: f64,
    pub start_time: f64,
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageJobParams {
    pub cash_envelope: String,
    pub taxable_income_envelope: Option<String>,
    pub federal_withholdings_envelope: Option<String>,
    pub state_withholdings_envelope: Option<String>,
    pub local_withholdings_envelope: Option<String>,
    pub p_401k_envelope: Option<String>,
    pub hourly_rate: f64,
    pub hours_per_week: f64,
    pub p_401k_contribution_pct: f64,
    pub employer_match_pct: f64,
    /// Days between paychecks (hourly jobs are typically biweekly).
    pub pay_frequency_days: f64,
    /// Flat fraction of each paycheck withheld for federal tax.
    pub federal_withholding_pct: f64,
    pub start_time: f64,
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassAwayParams {
    pub death_time: f64,
}

/// Envelope names the tax subsystem reads and writes (spec.md §4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSystemParams {
    pub taxable_income: String,
    pub federal_withholdings: String,
    pub state_withholdings: String,
    pub local_withholdings: String,
    pub ira_contributions: String,
    pub p_401k: String,
    pub p_401k_withdraw: String,
    pub p_401k_withdraw_withholding: String,
    pub penalty_401k: String,
    pub taxes_401k: String,
    pub roth: String,
    pub penalty_roth: String,
    pub roth_ira_principle: String,
    pub roth_ira_withdraw: String,
    pub short_term_capital_gains: String,
    pub long_term_capital_gains: String,
    pub irs_registered_account: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAmountParams {
    pub at_time: f64,
    pub new_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepAmountParams {
    pub delta: f64,
    pub period_days: f64,
    pub start_time: f64,
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseParams {
    pub at_time: f64,
    pub new_salary: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeContributionParams {
    pub at_time: f64,
    pub new_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeHoursParams {
    pub at_time: f64,
    pub new_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReoccurringRaiseParams {
    pub start_time: f64,
    pub period_days: f64,
    pub pct: f64,
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusParams {
    pub at_time: f64,
    pub amount: f64,
}
