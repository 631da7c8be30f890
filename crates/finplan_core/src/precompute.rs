//! Precompute stage: turn `T`/`R`/`Impulse` descriptors into `Precomputed`
//! occurrences against the time grid. `LazyCorrection`, `LazyFromEnvelopes`,
//! and `ScaleFromEnvelope` pass through untouched until their resolver stage.

use crate::grid::first_index_at_or_after;
use crate::model::{Descriptor, Direction, EnvelopeStore, Occurrence, Precomputed, PrecomputedKind, ValueSource};

/// Precompute every descriptor in `descriptors` against `grid`, replacing
/// the vector in place. Idempotent: re-running on an already-precomputed
/// list is a no-op (each `Precomputed` descriptor passes through itself).
pub fn precompute_descriptors(descriptors: &mut Vec<Descriptor>, grid: &[f64]) {
    let last = match grid.last() {
        Some(&t) => t,
        None => return,
    };

    for d in descriptors.iter_mut() {
        let replacement = match d {
            Descriptor::T {
                direction,
                growth,
                t_k,
                t0,
                value,
            } => {
                let start_index = first_index_at_or_after(grid, *t_k);
                let base = value.base_at(*t_k, *t0, *direction);
                Some(Descriptor::Precomputed(Precomputed {
                    direction: *direction,
                    growth: *growth,
                    occurrences: vec![Occurrence {
                        t_k: *t_k,
                        start_index,
                        base,
                    }],
                    kind: PrecomputedKind::Growing,
                }))
            }
            Descriptor::R {
                direction,
                growth,
                t0,
                dt,
                tf,
                value,
            } => {
                let end = tf.min(last);
                let mut occurrences = Vec::new();
                if *t0 <= end {
                    let count = ((end - *t0) / *dt).floor() as i64;
                    for i in 0..=count {
                        let t_k = *t0 + (i as f64) * *dt;
                        if t_k > end {
                            break;
                        }
                        let start_index = first_index_at_or_after(grid, t_k);
                        let base = base_for_occurrence(value, t_k, *t0, *direction);
                        occurrences.push(Occurrence {
                            t_k,
                            start_index,
                            base,
                        });
                    }
                }
                Some(Descriptor::Precomputed(Precomputed {
                    direction: *direction,
                    growth: *growth,
                    occurrences,
                    kind: PrecomputedKind::Growing,
                }))
            }
            Descriptor::Impulse {
                direction,
                growth,
                t_k,
                value,
            } => {
                let start_index = first_index_at_or_after(grid, *t_k);
                let base = value.base_at(*t_k, *t_k, *direction);
                Some(Descriptor::Precomputed(Precomputed {
                    direction: *direction,
                    growth: *growth,
                    occurrences: vec![Occurrence {
                        t_k: *t_k,
                        start_index,
                        base,
                    }],
                    kind: PrecomputedKind::Impulse,
                }))
            }
            Descriptor::LazyCorrection { .. }
            | Descriptor::LazyFromEnvelopes { .. }
            | Descriptor::ScaleFromEnvelope { .. }
            | Descriptor::Precomputed(_) => None,
        };
        if let Some(r) = replacement {
            *d = r;
        }
    }
}

fn base_for_occurrence(value: &ValueSource, t_k: f64, t0: f64, direction: Direction) -> f64 {
    value.base_at(t_k, t0, direction)
}

/// Precompute every envelope's descriptor list in `store` against `grid`.
pub fn precompute_all(store: &mut EnvelopeStore, grid: &[f64]) {
    let keys: Vec<_> = store.keys().collect();
    for key in keys {
        let envelope = store.get_mut(key);
        precompute_descriptors(&mut envelope.descriptors, grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Descriptor, Direction, EnvelopeKey, ValueSource};

    fn key() -> EnvelopeKey {
        EnvelopeKey(0)
    }

    #[test]
    fn t_descriptor_precomputes_single_occurrence() {
        let grid = vec![0.0, 365.0, 730.0];
        let mut descriptors = vec![Descriptor::T {
            direction: Direction::In,
            growth: key(),
            t_k: 100.0,
            t0: 0.0,
            value: ValueSource::Fixed(100.0),
        }];
        precompute_descriptors(&mut descriptors, &grid);
        match &descriptors[0] {
            Descriptor::Precomputed(p) => {
                assert_eq!(p.occurrences.len(), 1);
                assert_eq!(p.occurrences[0].start_index, 1);
                assert_eq!(p.occurrences[0].base, 100.0);
            }
            _ => panic!("expected Precomputed"),
        }
    }

    #[test]
    fn r_descriptor_enumerates_occurrences_per_spec_recurrence_count() {
        let grid = vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0];
        let mut descriptors = vec![Descriptor::R {
            direction: Direction::In,
            growth: key(),
            t0: 0.0,
            dt: 100.0,
            tf: 450.0,
            value: ValueSource::Fixed(10.0),
        }];
        precompute_descriptors(&mut descriptors, &grid);
        match &descriptors[0] {
            Descriptor::Precomputed(p) => {
                // floor((min(450, 500) - 0)/100) + 1 = 5
                assert_eq!(p.occurrences.len(), 5);
            }
            _ => panic!("expected Precomputed"),
        }
    }

    #[test]
    fn impulse_precomputes_with_impulse_kind() {
        let grid = vec![0.0, 365.0];
        let mut descriptors = vec![Descriptor::Impulse {
            direction: Direction::Out,
            growth: key(),
            t_k: 365.0,
            value: ValueSource::Fixed(50.0),
        }];
        precompute_descriptors(&mut descriptors, &grid);
        match &descriptors[0] {
            Descriptor::Precomputed(p) => {
                assert_eq!(p.kind, PrecomputedKind::Impulse);
                assert_eq!(p.occurrences[0].start_index, 1);
            }
            _ => panic!("expected Precomputed"),
        }
    }

    #[test]
    fn r_descriptor_past_grid_end_clamps_to_last_grid_point() {
        let grid = vec![0.0, 100.0, 200.0];
        let mut descriptors = vec![Descriptor::R {
            direction: Direction::In,
            growth: key(),
            t0: 0.0,
            dt: 50.0,
            tf: 1000.0,
            value: ValueSource::Fixed(1.0),
        }];
        precompute_descriptors(&mut descriptors, &grid);
        match &descriptors[0] {
            Descriptor::Precomputed(p) => {
                // floor((min(1000, 200) - 0)/50) + 1 = 5
                assert_eq!(p.occurrences.len(), 5);
                assert!(p.occurrences.iter().all(|o| o.t_k <= 200.0));
            }
            _ => panic!("expected Precomputed"),
        }
    }
}
