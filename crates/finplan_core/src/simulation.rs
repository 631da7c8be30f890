//! The core's single entry point (spec.md §6): `run_simulation`. Wires
//! together compile → precompute → evaluate → resolve → (optional)
//! inflation-adjust → result assembly, exactly the data flow spec.md §2
//! describes.

use rustc_hash::FxHashMap;

use crate::compilers::compile_plan;
use crate::error::{SimulationError, SimulationWarning};
use crate::evaluate::evaluate_all;
use crate::grid::build_grid;
use crate::inflation::adjust_series;
use crate::model::{DatePoint, EnvelopeKey, Plan, Schema, SimulationResult};
use crate::precompute::precompute_all;
use crate::resolve::run_resolver;

/// The full outcome of a run: either the result series, or the error that
/// aborted it (spec.md §7 — on any abort, the caller gets an empty result
/// set plus a human-readable reason).
pub struct SimulationOutcome {
    pub result: SimulationResult,
    pub warnings: Vec<SimulationWarning>,
    pub error: Option<SimulationError>,
}

impl SimulationOutcome {
    fn failed(error: SimulationError) -> Self {
        tracing::warn!(%error, "simulation run aborted");
        SimulationOutcome {
            result: SimulationResult::empty(),
            warnings: Vec::new(),
            error: Some(error),
        }
    }
}

/// Run one simulation: compile `plan`'s events into descriptors, build the
/// time grid over `[start_day, end_day]`, evaluate, resolve lazy
/// descriptors in stages, optionally inflation-adjust, and emit a dense
/// per-envelope time series (spec.md §6).
///
/// `schema` is accepted per the external interface but the core only
/// reads `schema.inflation_rate` as a fallback when the plan doesn't
/// specify its own; the schema's per-event-type parameter descriptors
/// belong to the out-of-scope plan editor (spec.md §1).
pub fn run_simulation(
    plan: &Plan,
    schema: &Schema,
    start_day: f64,
    end_day: f64,
    interval: f64,
    current_day: Option<f64>,
) -> SimulationOutcome {
    let mut store = match compile_plan(plan, start_day, end_day) {
        Ok(store) => store,
        Err(e) => return SimulationOutcome::failed(e),
    };

    let grid = build_grid(start_day, end_day, interval, None, current_day);
    if grid.is_empty() {
        return SimulationOutcome {
            result: SimulationResult::empty(),
            warnings: Vec::new(),
            error: None,
        };
    }

    precompute_all(&mut store, &grid);
    let baseline = evaluate_all(&store, &grid, None);
    let resolved = run_resolver(&mut store, &grid, baseline);

    let inflation_rate = if plan.inflation_rate != 0.0 {
        plan.inflation_rate
    } else {
        schema.inflation_rate
    };

    let names: FxHashMap<EnvelopeKey, &str> = store.iter().map(|(key, env)| (key, env.name.as_str())).collect();

    let result = assemble_result(
        &grid,
        &resolved.results,
        &names,
        plan.adjust_for_inflation.then_some(current_day).flatten().map(|c| (c, inflation_rate)),
    );

    tracing::debug!(
        points = result.points.len(),
        envelopes = store.len(),
        warnings = resolved.warnings.len(),
        "simulation run complete"
    );

    SimulationOutcome {
        result,
        warnings: resolved.warnings,
        error: None,
    }
}

/// Assemble the dense per-date result, dropping any envelope whose series
/// is identically zero from that date's `parts` (spec.md §6). `inflation`
/// is `Some((current_day, rate))` when post-processing should run
/// (spec.md §4.9).
fn assemble_result(
    grid: &[f64],
    results: &FxHashMap<EnvelopeKey, Vec<f64>>,
    names: &FxHashMap<EnvelopeKey, &str>,
    inflation: Option<(f64, f64)>,
) -> SimulationResult {
    let adjusted: FxHashMap<EnvelopeKey, Vec<f64>> = match inflation {
        Some((current_day, rate)) => results
            .iter()
            .map(|(&key, series)| (key, adjust_series(series, grid, current_day, rate)))
            .collect(),
        None => results.clone(),
    };

    let mut keys: Vec<_> = adjusted.keys().copied().collect();
    keys.sort_by_key(|k| k.0);

    let mut points = Vec::with_capacity(grid.len());
    for (j, &date) in grid.iter().enumerate() {
        let mut parts = Vec::new();
        let mut total = 0.0;
        for &key in &keys {
            let v = adjusted[&key][j];
            total += v;
            if series_is_nonzero(&adjusted[&key]) {
                parts.push((names[&key].to_string(), v));
            }
        }
        points.push(DatePoint { date, value: total, parts });
    }
    SimulationResult { points }
}

fn series_is_nonzero(series: &[f64]) -> bool {
    series.iter().any(|&v| v.abs() > 1e-12)
}
