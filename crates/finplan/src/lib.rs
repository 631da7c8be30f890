//! A thin native CLI shell over `finplan_core`: load a plan file, run
//! `finplan_core::simulation::run_simulation`, and render the resulting
//! series.

pub mod demo;
pub mod logging;
pub mod output;
pub mod plan_file;
pub mod util;

pub use logging::init_logging;
pub use plan_file::{PlanFile, PlanFileError};
