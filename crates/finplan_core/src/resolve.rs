//! Staged dependency resolver. Runs after the initial evaluate pass, three
//! ordered stages, re-precomputing/re-evaluating between them:
//!
//! - stage 10: `LazyCorrection` — drive an envelope to a target value.
//! - stage 20: `ScaleFromEnvelope` — proportional terms reading another
//!   envelope's stage-10 result (no descriptor mutation needed: the vector
//!   evaluator already knows how to read a cross-envelope reader).
//! - stage 30: `LazyFromEnvelopes` — arbitrary callbacks reading any
//!   envelope's stage-20 result.

use rustc_hash::FxHashMap;

use crate::evaluate::{evaluate_all, EvaluationOutcome};
use crate::grid::{first_index_at_or_after, index_of};
use crate::model::{Descriptor, Direction, EnvelopeKey, EnvelopeStore, EnvelopeValueReader, ValueSource};
use crate::precompute::precompute_all;

const CORRECTION_EPSILON: f64 = 1e-9;

struct ResultsReader<'a> {
    results: &'a FxHashMap<EnvelopeKey, Vec<f64>>,
}

impl EnvelopeValueReader for ResultsReader<'_> {
    fn value_at(&self, envelope: EnvelopeKey, index: usize) -> f64 {
        self.results
            .get(&envelope)
            .and_then(|series| series.get(index))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Stage 10. Replaces every `LazyCorrection` in the store with a corrective
/// `T` descriptor driving its envelope to the target (or nothing, if
/// already within epsilon). Consumes the lazy descriptors either way.
fn resolve_corrections(store: &mut EnvelopeStore, grid: &[f64], results: &FxHashMap<EnvelopeKey, Vec<f64>>) {
    for key in store.keys().collect::<Vec<_>>() {
        let series = results.get(&key);
        let env = store.get_mut(key);
        let mut rebuilt = Vec::with_capacity(env.descriptors.len());
        for d in env.descriptors.drain(..) {
            match d {
                Descriptor::LazyCorrection { t_k, target } => {
                    let current = series
                        .and_then(|s| index_of(grid, t_k).and_then(|i| s.get(i)))
                        .copied()
                        .unwrap_or(0.0);
                    let diff = target - current;
                    if diff.abs() > CORRECTION_EPSILON {
                        let direction = if diff >= 0.0 { Direction::In } else { Direction::Out };
                        rebuilt.push(Descriptor::T {
                            direction,
                            growth: key,
                            t_k,
                            t0: t_k,
                            value: ValueSource::Fixed(diff.abs()),
                        });
                    }
                }
                other => rebuilt.push(other),
            }
        }
        env.descriptors = rebuilt;
    }
}

/// Stage 30. Replaces every `LazyFromEnvelopes` with a one-shot `T` on its
/// host envelope carrying the callback's result.
fn resolve_lazy_from_envelopes(store: &mut EnvelopeStore, grid: &[f64], results: &FxHashMap<EnvelopeKey, Vec<f64>>) {
    let reader = ResultsReader { results };
    for key in store.keys().collect::<Vec<_>>() {
        let env = store.get_mut(key);
        let mut rebuilt = Vec::with_capacity(env.descriptors.len());
        for d in env.descriptors.drain(..) {
            match d {
                Descriptor::LazyFromEnvelopes { t_k, compute } => {
                    let index = index_of(grid, t_k).unwrap_or_else(|| first_index_at_or_after(grid, t_k));
                    if index < grid.len() {
                        let value = compute(&reader, index);
                        let direction = if value >= 0.0 { Direction::In } else { Direction::Out };
                        rebuilt.push(Descriptor::T {
                            direction,
                            growth: key,
                            t_k,
                            t0: t_k,
                            value: ValueSource::Fixed(value.abs()),
                        });
                    }
                }
                other => rebuilt.push(other),
            }
        }
        env.descriptors = rebuilt;
    }
}

/// Run the full three-stage resolver against an already-precomputed,
/// already-evaluated store, and return the final evaluation. `baseline` is
/// the pre-resolver evaluation.
pub fn run_resolver(store: &mut EnvelopeStore, grid: &[f64], baseline: EvaluationOutcome) -> EvaluationOutcome {
    let mut warnings = baseline.warnings;

    // Stage 10: corrections, against the pre-resolver baseline.
    resolve_corrections(store, grid, &baseline.results);
    precompute_all(store, grid);
    let stage10 = evaluate_all(store, grid, None);
    tracing::debug!(warnings = stage10.warnings.len(), "resolver stage 10 (corrections) done");
    warnings.extend(stage10.warnings.iter().cloned());

    // Stage 20: ScaleFromEnvelope, reading stage 10's results. No
    // descriptor mutation is needed — the evaluator resolves it directly
    // given a reader.
    let stage10_reader = ResultsReader {
        results: &stage10.results,
    };
    let stage20 = evaluate_all(store, grid, Some(&stage10_reader));
    tracing::debug!(warnings = stage20.warnings.len(), "resolver stage 20 (scale-from-envelope) done");
    warnings.extend(stage20.warnings.iter().cloned());

    // Stage 30: cross-envelope lazy values, reading stage 20's results.
    resolve_lazy_from_envelopes(store, grid, &stage20.results);
    precompute_all(store, grid);
    let stage20_reader = ResultsReader {
        results: &stage20.results,
    };
    let mut final_outcome = evaluate_all(store, grid, Some(&stage20_reader));
    tracing::debug!(
        warnings = final_outcome.warnings.len(),
        "resolver stage 30 (lazy-from-envelopes) done"
    );
    warnings.append(&mut final_outcome.warnings);
    final_outcome.warnings = warnings;
    final_outcome
}
