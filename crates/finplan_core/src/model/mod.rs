mod descriptor;
mod envelope;
mod ids;
mod plan;
mod results;
mod tax_config;
pub mod theta;

pub use descriptor::{
    Descriptor, Direction, EnvelopeValueReader, LazyComputeFn, Occurrence, Precomputed,
    PrecomputedKind, ValueSource,
};
pub use envelope::{Envelope, EnvelopeStore};
pub use ids::{EnvelopeKey, EventId};
pub use plan::{
    BonusParams, ChangeContributionParams, ChangeHoursParams, EnvelopeSpec, Event, EventKind,
    FlowParams, InflationAdjustedFlowParams, JobParams, LoanParams, ManualCorrectionParams,
    MonthlyBudgetingParams, PassAwayParams, Plan, RaiseParams, ReoccurringRaiseParams, Schema,
    StepAmountParams, StudentLoanParams, TaxSystemParams, TransferParams, UpdateAmountParams,
    WageJobParams,
};
pub use results::{DatePoint, SimulationResult};
pub use tax_config::{
    age_59_half_day, Dependents, FilingStatus, TaxBracket, DEPENDENT_CREDIT,
    EARLY_WITHDRAWAL_PENALTY_RATE, FEDERAL_MFJ_2023, FEDERAL_SINGLE_2023, LOCAL_FLAT_RATE,
    LTCG_MFJ_2023, LTCG_SINGLE_2023, STATE_FLAT_RATE, TAX_DAY_OFFSET_DAYS,
};
pub use theta::{ComputeFn, ParamFn, Theta, ThetaTemplate};
