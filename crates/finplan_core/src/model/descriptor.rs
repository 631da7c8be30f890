//! The descriptor algebra (spec.md §3–§4.2): `T`, `R`, `Impulse`, and the
//! three lazy kinds (`LazyCorrection`, `LazyFromEnvelopes`,
//! `ScaleFromEnvelope`).

use std::fmt;

use super::ids::EnvelopeKey;
use super::theta::{ComputeFn, Theta, ThetaTemplate};

/// Whether a descriptor adds to (`In`) or subtracts from (`Out`) its
/// envelope's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::In => 1.0,
            Direction::Out => -1.0,
        }
    }
}

/// How a one-shot or recurring descriptor's base value is resolved at
/// precompute time.
#[derive(Clone)]
pub enum ValueSource {
    /// A plain constant `v`.
    Fixed(f64),
    /// `computeValue(Θ(t_k), t_k − t0)`.
    Computed { theta: ThetaTemplate, compute: ComputeFn },
    /// `params[key]` where `key` is `"a"` for `In`, `"b"` for `Out` — the
    /// `R` descriptor's fallback form when no compute function is given
    /// (spec.md §4.2).
    Keyed(ThetaTemplate),
}

impl ValueSource {
    pub fn base_at(&self, t_k: f64, t0: f64, direction: Direction) -> f64 {
        match self {
            ValueSource::Fixed(v) => *v,
            ValueSource::Computed { theta, compute } => compute(&theta.at(t_k), t_k - t0),
            ValueSource::Keyed(theta) => {
                let key = match direction {
                    Direction::In => "a",
                    Direction::Out => "b",
                };
                theta.at(t_k).get(key)
            }
        }
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Fixed(v) => write!(f, "Fixed({v})"),
            ValueSource::Computed { .. } => write!(f, "Computed(..)"),
            ValueSource::Keyed(_) => write!(f, "Keyed(..)"),
        }
    }
}

/// Reads another envelope's already-computed result at a given grid index.
/// Implemented by the resolver's working state (spec.md §4.6, "stage 30").
/// `Sync` so the vector evaluator (spec.md §5) can share one reader across
/// the `rayon` per-envelope parallel pass.
pub trait EnvelopeValueReader: Sync {
    fn value_at(&self, envelope: EnvelopeKey, index: usize) -> f64;
}

/// `LazyFromEnvelopes`'s callback: `computeTarget({index, getValueAt})`.
/// A boxed closure rather than a bare function pointer — unlike `Θ(t)`
/// (replaced by the tagged `ParamFn` enum above), this callback is
/// inherently about reading live cross-envelope state, which a closure
/// captures naturally without needing runtime code generation.
pub type LazyComputeFn = Box<dyn Fn(&dyn EnvelopeValueReader, usize) -> f64 + Send + Sync>;

/// A single envelope's unresolved contribution term.
pub enum Descriptor {
    /// One-shot term at `t_k`.
    T {
        direction: Direction,
        growth: EnvelopeKey,
        t_k: f64,
        t0: f64,
        value: ValueSource,
    },
    /// Recurring schedule `{t0, dt, tf}`.
    R {
        direction: Direction,
        growth: EnvelopeKey,
        t0: f64,
        dt: f64,
        tf: f64,
        value: ValueSource,
    },
    /// Single non-growing spike, contributing only at `t = t_k` exactly.
    Impulse {
        direction: Direction,
        growth: EnvelopeKey,
        t_k: f64,
        value: ValueSource,
    },
    /// Forces the containing envelope's running total to `target` at
    /// `t_k`, resolved in stage 10.
    LazyCorrection { t_k: f64, target: f64 },
    /// Contributes a value computed from other envelopes' results at
    /// `t_k`, resolved in stage 30.
    LazyFromEnvelopes { t_k: f64, compute: LazyComputeFn },
    /// Piecewise proportional term: `sign · coeff · valueOf(source, t)`
    /// for `t < until_day`, else 0. Resolved in stage 20.
    ScaleFromEnvelope {
        direction: Direction,
        source: EnvelopeKey,
        coeff: f64,
        until_day: f64,
    },
    /// A `T`/`R`/`Impulse` descriptor that has already been through
    /// precompute (spec.md §4.4); carries grid-relative occurrence data
    /// instead of raw time parameters.
    Precomputed(Precomputed),
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::T { t_k, direction, .. } => {
                f.debug_struct("T").field("t_k", t_k).field("direction", direction).finish()
            }
            Descriptor::R { t0, dt, tf, direction, .. } => f
                .debug_struct("R")
                .field("t0", t0)
                .field("dt", dt)
                .field("tf", tf)
                .field("direction", direction)
                .finish(),
            Descriptor::Impulse { t_k, direction, .. } => f
                .debug_struct("Impulse")
                .field("t_k", t_k)
                .field("direction", direction)
                .finish(),
            Descriptor::LazyCorrection { t_k, target } => {
                f.debug_struct("LazyCorrection").field("t_k", t_k).field("target", target).finish()
            }
            Descriptor::LazyFromEnvelopes { t_k, .. } => {
                f.debug_struct("LazyFromEnvelopes").field("t_k", t_k).finish()
            }
            Descriptor::ScaleFromEnvelope {
                source,
                coeff,
                until_day,
                direction,
                ..
            } => f
                .debug_struct("ScaleFromEnvelope")
                .field("source", source)
                .field("coeff", coeff)
                .field("until_day", until_day)
                .field("direction", direction)
                .finish(),
            Descriptor::Precomputed(p) => f.debug_struct("Precomputed").field("kind", &p.kind).finish(),
        }
    }
}

/// One materialized occurrence of a `T`/`R` descriptor after precompute.
#[derive(Debug, Clone, Copy)]
pub struct Occurrence {
    pub t_k: f64,
    /// First grid index `>= t_k` (binary search result).
    pub start_index: usize,
    pub base: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecomputedKind {
    /// Grows forward from `start_index` under the envelope's growth model.
    Growing,
    /// Contributes only exactly at `t_k`, with no growth.
    Impulse,
}

/// The output of precompute for one `T`/`R`/`Impulse` descriptor: depends
/// only on the grid and its own parameters (spec.md §4.4 invariant).
#[derive(Debug, Clone)]
pub struct Precomputed {
    pub direction: Direction,
    pub growth: EnvelopeKey,
    pub occurrences: Vec<Occurrence>,
    pub kind: PrecomputedKind,
}
