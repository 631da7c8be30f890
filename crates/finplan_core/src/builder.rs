//! Plan Builder DSL
//!
//! A fluent API for assembling a [`Plan`] in code rather than hand-writing
//! the JSON/YAML wire format, mirroring the teacher's
//! `config::builder::SimulationBuilder`/`AccountBuilder`/`EventBuilder`
//! trio (SPEC_FULL.md §2's ambient-configuration section). Intended for
//! tests and the CLI's `--demo` mode, not for the out-of-scope plan editor.
//!
//! # Example
//!
//! ```ignore
//! use finplan_core::builder::{EnvelopeBuilder, PlanBuilder};
//! use finplan_core::growth::GrowthModel;
//!
//! let plan = PlanBuilder::new(1990, 1, 1)
//!     .envelope(EnvelopeBuilder::bank("Cash"))
//!     .envelope(EnvelopeBuilder::new("Savings").growth(GrowthModel::YearlyCompound { rate: 0.04 }))
//!     .inflow("Cash", 5000.0, 0.0)
//!     .transfer("Cash", "Savings", 500.0, 0.0)
//!     .build();
//! ```

use std::collections::HashMap;

use jiff::civil::date;

use crate::growth::GrowthModel;
use crate::model::{
    Dependents, Event, EventId, EventKind, EnvelopeSpec, FilingStatus, FlowParams, Plan, Schema,
    TransferParams,
};

/// Fluent builder for a single [`EnvelopeSpec`].
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    name: String,
    category: String,
    growth: GrowthModel,
}

impl EnvelopeBuilder {
    /// A new envelope named `name`, category `"uncategorized"`, no growth.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        EnvelopeBuilder {
            name: name.into(),
            category: "uncategorized".into(),
            growth: GrowthModel::None,
        }
    }

    /// Convenience: a plain cash envelope (category `"bank"`, no growth).
    #[must_use]
    pub fn bank(name: impl Into<String>) -> Self {
        EnvelopeBuilder::new(name).category("bank")
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn growth(mut self, growth: GrowthModel) -> Self {
        self.growth = growth;
        self
    }

    #[must_use]
    pub fn build(self) -> EnvelopeSpec {
        EnvelopeSpec {
            name: self.name,
            category: self.category,
            growth: self.growth,
        }
    }
}

/// Fluent builder for a [`Plan`], with automatic event id assignment and a
/// few quick-flow convenience methods (`inflow`/`outflow`/`transfer`) for
/// the common cases, the way the teacher's `SimulationBuilder` offers
/// `bank`/`monthly_income`/`monthly_expense` shortcuts over its own
/// `account`/`event` builders.
pub struct PlanBuilder {
    birth_date: jiff::civil::Date,
    adjust_for_inflation: bool,
    inflation_rate: f64,
    filing_status: FilingStatus,
    dependents: Dependents,
    location: String,
    envelopes: Vec<EnvelopeSpec>,
    events: Vec<Event>,
    next_event_id: u32,
}

impl PlanBuilder {
    #[must_use]
    pub fn new(birth_year: i16, birth_month: i8, birth_day: i8) -> Self {
        PlanBuilder {
            birth_date: date(birth_year, birth_month, birth_day),
            adjust_for_inflation: false,
            inflation_rate: 0.0,
            filing_status: FilingStatus::Single,
            dependents: Dependents(0),
            location: String::new(),
            envelopes: Vec::new(),
            events: Vec::new(),
            next_event_id: 0,
        }
    }

    #[must_use]
    pub fn adjust_for_inflation(mut self, on: bool) -> Self {
        self.adjust_for_inflation = on;
        self
    }

    #[must_use]
    pub fn inflation_rate(mut self, rate: f64) -> Self {
        self.inflation_rate = rate;
        self
    }

    #[must_use]
    pub fn filing_status(mut self, status: FilingStatus) -> Self {
        self.filing_status = status;
        self
    }

    #[must_use]
    pub fn dependents(mut self, count: u32) -> Self {
        self.dependents = Dependents(count);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn envelope(mut self, envelope: EnvelopeBuilder) -> Self {
        self.envelopes.push(envelope.build());
        self
    }

    /// Append an already-constructed event, auto-assigning its id.
    #[must_use]
    pub fn event(mut self, kind: EventKind) -> Self {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        self.events.push(Event {
            id,
            kind,
            event_functions: HashMap::new(),
            updating_events: Vec::new(),
        });
        self
    }

    /// Quick one-shot inflow into `envelope` at `start_time`.
    #[must_use]
    pub fn inflow(self, envelope: impl Into<String>, amount: f64, start_time: f64) -> Self {
        self.event(EventKind::Inflow(FlowParams {
            envelope: envelope.into(),
            amount,
            start_time,
            is_recurring: false,
            end_time: None,
            frequency_days: None,
        }))
    }

    /// Quick one-shot outflow from `envelope` at `start_time`.
    #[must_use]
    pub fn outflow(self, envelope: impl Into<String>, amount: f64, start_time: f64) -> Self {
        self.event(EventKind::Outflow(FlowParams {
            envelope: envelope.into(),
            amount,
            start_time,
            is_recurring: false,
            end_time: None,
            frequency_days: None,
        }))
    }

    /// Quick recurring inflow into `envelope`, every `frequency_days`
    /// between `start_time` and `end_time`.
    #[must_use]
    pub fn recurring_inflow(
        self,
        envelope: impl Into<String>,
        amount: f64,
        start_time: f64,
        end_time: f64,
        frequency_days: f64,
    ) -> Self {
        self.event(EventKind::Inflow(FlowParams {
            envelope: envelope.into(),
            amount,
            start_time,
            is_recurring: true,
            end_time: Some(end_time),
            frequency_days: Some(frequency_days),
        }))
    }

    /// Quick one-shot transfer between two envelopes.
    #[must_use]
    pub fn transfer(self, from: impl Into<String>, to: impl Into<String>, amount: f64, start_time: f64) -> Self {
        self.event(EventKind::TransferMoney(TransferParams {
            from: from.into(),
            to: to.into(),
            amount,
            start_time,
            is_recurring: false,
            end_time: None,
            frequency_days: None,
        }))
    }

    #[must_use]
    pub fn build(self) -> Plan {
        Plan {
            birth_date: self.birth_date,
            adjust_for_inflation: self.adjust_for_inflation,
            inflation_rate: self.inflation_rate,
            filing_status: self.filing_status,
            dependents: self.dependents,
            location: self.location,
            envelopes: self.envelopes,
            events: self.events,
        }
    }
}

/// A minimal schema with no categories and no fallback inflation rate —
/// enough to drive `run_simulation` for builder-constructed plans, which
/// always carry their own `inflation_rate`.
#[must_use]
pub fn demo_schema() -> Schema {
    Schema {
        categories: Vec::new(),
        inflation_rate: 0.0,
    }
}
