//! Integration tests exercising `run_simulation` end to end, organized by
//! topic the way the teacher organizes `crates/finplan_core/src/tests/`:
//!
//! - `scenarios` — the concrete literal-input scenarios spec.md §8 lists
//! - `growth_properties` — `f_growth` identities and monotonicity
//! - `resolver_properties` — correction drive-to-target, 59½ penalty zeroing
//! - `inflation_properties` — present-value round-trip

mod growth_properties;
mod scenarios;
