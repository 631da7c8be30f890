//! Vector evaluator (spec.md §4.5): sums every precomputed descriptor of
//! one envelope into a dense series aligned with the time grid. Envelopes
//! are independent within one evaluate pass (spec.md §5), so the per-
//! envelope loop is parallelized with `rayon` behind the `parallel`
//! feature, the same feature the teacher's engine already exposes.

use rustc_hash::FxHashMap;

use crate::error::SimulationWarning;
use crate::growth::f_growth;
use crate::model::{Descriptor, EnvelopeKey, EnvelopeStore, EnvelopeValueReader, PrecomputedKind};

pub struct EvaluationOutcome {
    pub results: FxHashMap<EnvelopeKey, Vec<f64>>,
    pub warnings: Vec<SimulationWarning>,
}

/// Evaluate every envelope in `store` against `grid`. `reader` supplies
/// cross-envelope values for `ScaleFromEnvelope` descriptors once an
/// earlier resolver stage has populated them; pass `None` for the first,
/// pre-resolver pass (spec.md §4.5 — no `ScaleFromEnvelope` contributes
/// until its source has a value).
pub fn evaluate_all(
    store: &EnvelopeStore,
    grid: &[f64],
    reader: Option<&(dyn EnvelopeValueReader + Sync)>,
) -> EvaluationOutcome {
    let envelopes: Vec<(EnvelopeKey, &str, &[Descriptor])> = store
        .iter()
        .map(|(key, env)| (key, env.name.as_str(), env.descriptors.as_slice()))
        .collect();

    let per_envelope: Vec<(EnvelopeKey, Vec<f64>, Vec<SimulationWarning>)> = run_envelopes(&envelopes, grid, store, reader);

    let mut results = FxHashMap::default();
    let mut warnings = Vec::new();
    for (key, series, mut w) in per_envelope {
        results.insert(key, series);
        warnings.append(&mut w);
    }
    EvaluationOutcome { results, warnings }
}

#[cfg(feature = "parallel")]
fn run_envelopes(
    envelopes: &[(EnvelopeKey, &str, &[Descriptor])],
    grid: &[f64],
    store: &EnvelopeStore,
    reader: Option<&(dyn EnvelopeValueReader + Sync)>,
) -> Vec<(EnvelopeKey, Vec<f64>, Vec<SimulationWarning>)> {
    use rayon::prelude::*;
    envelopes
        .par_iter()
        .map(|(key, name, descriptors)| {
            let mut warnings = Vec::new();
            let series = evaluate_envelope(name, descriptors, grid, store, reader, &mut warnings);
            (*key, series, warnings)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_envelopes(
    envelopes: &[(EnvelopeKey, &str, &[Descriptor])],
    grid: &[f64],
    store: &EnvelopeStore,
    reader: Option<&(dyn EnvelopeValueReader + Sync)>,
) -> Vec<(EnvelopeKey, Vec<f64>, Vec<SimulationWarning>)> {
    envelopes
        .iter()
        .map(|(key, name, descriptors)| {
            let mut warnings = Vec::new();
            let series = evaluate_envelope(name, descriptors, grid, store, reader, &mut warnings);
            (*key, series, warnings)
        })
        .collect()
}

fn evaluate_envelope(
    name: &str,
    descriptors: &[Descriptor],
    grid: &[f64],
    store: &EnvelopeStore,
    reader: Option<&(dyn EnvelopeValueReader + Sync)>,
    warnings: &mut Vec<SimulationWarning>,
) -> Vec<f64> {
    let mut out = vec![0.0f64; grid.len()];

    for d in descriptors {
        match d {
            Descriptor::Precomputed(p) => {
                let growth = store.get(p.growth).growth;
                let sign = p.direction.sign();
                match p.kind {
                    PrecomputedKind::Growing => {
                        for occ in &p.occurrences {
                            for j in occ.start_index..grid.len() {
                                let delta_t = grid[j] - occ.t_k;
                                let mult = f_growth(growth, delta_t).unwrap_or(0.0);
                                out[j] += sign * occ.base * mult;
                            }
                        }
                    }
                    PrecomputedKind::Impulse => {
                        for occ in &p.occurrences {
                            if occ.start_index < grid.len() && (grid[occ.start_index] - occ.t_k).abs() < 1e-9 {
                                out[occ.start_index] += sign * occ.base;
                            }
                        }
                    }
                }
            }
            Descriptor::ScaleFromEnvelope {
                direction,
                source,
                coeff,
                until_day,
            } => {
                if let Some(reader) = reader {
                    for (j, &t) in grid.iter().enumerate() {
                        if t < *until_day {
                            out[j] += direction.sign() * coeff * reader.value_at(*source, j);
                        }
                    }
                }
            }
            // Raw T/R/Impulse (not yet precomputed) and the other lazy
            // kinds contribute nothing here; the resolver stages handle
            // them after their own precompute/evaluate passes.
            Descriptor::T { .. }
            | Descriptor::R { .. }
            | Descriptor::Impulse { .. }
            | Descriptor::LazyCorrection { .. }
            | Descriptor::LazyFromEnvelopes { .. } => {}
        }
    }

    for (j, v) in out.iter_mut().enumerate() {
        if !v.is_finite() {
            warnings.push(SimulationWarning::NumericFailure {
                envelope: name.to_string(),
                grid_index: j,
            });
            *v = 0.0;
        }
    }

    out
}
