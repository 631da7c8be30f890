//! Parameter functions (`Θ`) and the `γ` piecewise-override operator.
//!
//! The source language represents `Θ(t)` with captured closures; per the
//! "source patterns requiring re-architecture" note, closures are replaced
//! here with an explicit tagged enum dispatched by `eval`, so a `ParamFn` is
//! `Copy`/`Clone`/`Send` and never generates code at runtime.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A scalar parameter that may vary with time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamFn {
    /// A fixed value, independent of `t`.
    Constant(f64),

    /// `v0 + Δ·floor((clamp(t, start, end) − start) / period)`.
    ///
    /// Used for step raises and other periodic bumps. `t` is clamped to
    /// `start` before the window opens and to `end` (if given) once it
    /// closes, so the stepped value freezes rather than reversing.
    StepAdjusted {
        v0: f64,
        delta: f64,
        period_days: f64,
        start: f64,
        end: Option<f64>,
    },

    /// `base · (1 + r_inf)^(max(0, t − t_start)/365)`.
    InflationAdjusted {
        base: f64,
        rate: f64,
        t_start: f64,
    },

    /// `v0 · (1 + pct)^floor((clamp(t, start, end) − start) / period)`.
    ///
    /// The multiplicative counterpart of `StepAdjusted`, for compounding
    /// periodic raises (`reoccurring_raise`) rather than additive bumps.
    /// Clamping behaves the same way: frozen before `start`, frozen at the
    /// last full period once `end` passes.
    PercentStepAdjusted {
        v0: f64,
        pct: f64,
        period_days: f64,
        start: f64,
        end: Option<f64>,
    },

    /// `γ(Θ, changes, t*)`: `before` for `t < t_star`, `after` otherwise.
    /// `after` may itself be any `ParamFn`, including another `Gamma`, so
    /// a chain of overrides composes by nesting.
    Gamma {
        before: Box<ParamFn>,
        t_star: f64,
        after: Box<ParamFn>,
    },
}

impl ParamFn {
    pub fn constant(v: f64) -> Self {
        ParamFn::Constant(v)
    }

    /// `γ(Θ, changes, t*)` applied to a single field: keep `self` before
    /// `t_star`, switch to `changes` at and after it.
    pub fn gamma(self, t_star: f64, changes: ParamFn) -> Self {
        ParamFn::Gamma {
            before: Box::new(self),
            t_star,
            after: Box::new(changes),
        }
    }

    pub fn step_adjust(v0: f64, delta: f64, period_days: f64, start: f64, end: Option<f64>) -> Self {
        ParamFn::StepAdjusted {
            v0,
            delta,
            period_days,
            start,
            end,
        }
    }

    pub fn inflation_adjust(base: f64, rate: f64, t_start: f64) -> Self {
        ParamFn::InflationAdjusted { base, rate, t_start }
    }

    pub fn percent_step_adjust(v0: f64, pct: f64, period_days: f64, start: f64, end: Option<f64>) -> Self {
        ParamFn::PercentStepAdjusted {
            v0,
            pct,
            period_days,
            start,
            end,
        }
    }

    /// Evaluate this parameter function at day-offset `t`.
    pub fn eval(&self, t: f64) -> f64 {
        match self {
            ParamFn::Constant(v) => *v,
            ParamFn::StepAdjusted {
                v0,
                delta,
                period_days,
                start,
                end,
            } => {
                let mut clamped = t.max(*start);
                if let Some(e) = end {
                    clamped = clamped.min(*e);
                }
                v0 + delta * ((clamped - start) / period_days).floor()
            }
            ParamFn::InflationAdjusted { base, rate, t_start } => {
                let dt = (t - t_start).max(0.0);
                base * (1.0 + rate).powf(dt / 365.0)
            }
            ParamFn::PercentStepAdjusted {
                v0,
                pct,
                period_days,
                start,
                end,
            } => {
                let mut clamped = t.max(*start);
                if let Some(e) = end {
                    clamped = clamped.min(*e);
                }
                v0 * (1.0 + pct).powf(((clamped - start) / period_days).floor())
            }
            ParamFn::Gamma { before, t_star, after } => {
                if t < *t_star {
                    before.eval(t)
                } else {
                    after.eval(t)
                }
            }
        }
    }
}

/// `Θ(t)`: a named bag of parameter functions, evaluated field-by-field.
///
/// Event compilers key this by small `&'static str` field names local to
/// the event kind (`"amount"`, `"a"`, `"b"`, `"rate"`, ...) — a closed,
/// compiler-known set, not arbitrary plan-authored strings, so this keeps
/// the "typed per-event parameter struct" spirit of the re-architecture
/// note while still letting the descriptor algebra stay generic over field
/// count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThetaTemplate(pub FxHashMap<&'static str, ParamFn>);

impl ThetaTemplate {
    pub fn new() -> Self {
        Self(FxHashMap::default())
    }

    pub fn with(mut self, key: &'static str, f: ParamFn) -> Self {
        self.0.insert(key, f);
        self
    }

    /// Evaluate every field at `t`, producing the plain resolved struct.
    pub fn at(&self, t: f64) -> Theta {
        Theta(self.0.iter().map(|(k, f)| (*k, f.eval(t))).collect())
    }

    /// `γ(Θ, changes, t*)`: override the named fields in `changes`,
    /// starting at `t_star`; fields not present in `changes` are
    /// untouched.
    pub fn gamma(&self, t_star: f64, changes: &[(&'static str, ParamFn)]) -> ThetaTemplate {
        let mut next = self.clone();
        for (key, new_fn) in changes {
            let base = next.0.get(key).cloned().unwrap_or(ParamFn::Constant(0.0));
            next.0.insert(key, base.gamma(t_star, new_fn.clone()));
        }
        next
    }
}

/// `Θ` evaluated at a single point in time: a plain `key -> f64` struct.
#[derive(Debug, Clone, Default)]
pub struct Theta(pub FxHashMap<&'static str, f64>);

impl Theta {
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }
}

/// `computeValue(Θ(t_k), t_k − t0)` callback type. Plain function pointers
/// (not closures) per the "avoid runtime code generation" design note —
/// each event kind that needs a derived base value (salary with bonus
/// schedule, wage with OT, amortized loan payment, ...) defines one of
/// these in its compiler module.
pub type ComputeFn = fn(&Theta, f64) -> f64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_time_invariant() {
        let p = ParamFn::constant(42.0);
        assert_eq!(p.eval(0.0), 42.0);
        assert_eq!(p.eval(10_000.0), 42.0);
    }

    #[test]
    fn step_adjust_freezes_outside_window() {
        let p = ParamFn::step_adjust(1000.0, 100.0, 365.0, 0.0, Some(1095.0));
        assert_eq!(p.eval(-10.0), 1000.0);
        assert_eq!(p.eval(0.0), 1000.0);
        assert_eq!(p.eval(364.9), 1000.0);
        assert_eq!(p.eval(365.0), 1100.0);
        assert_eq!(p.eval(900.0), 1200.0);
        // past `end`, value freezes at the clamp point rather than climbing further
        assert_eq!(p.eval(5000.0), p.eval(1095.0));
    }

    #[test]
    fn percent_step_adjust_compounds_per_period() {
        let p = ParamFn::percent_step_adjust(1000.0, 0.05, 365.0, 0.0, Some(1095.0));
        assert_eq!(p.eval(-10.0), 1000.0);
        assert_eq!(p.eval(364.9), 1000.0);
        assert!((p.eval(365.0) - 1050.0).abs() < 1e-9);
        assert!((p.eval(730.0) - 1102.5).abs() < 1e-9);
        // past `end`, value freezes at the clamp point rather than compounding further
        assert_eq!(p.eval(5000.0), p.eval(1095.0));
    }

    #[test]
    fn gamma_switches_at_t_star() {
        let p = ParamFn::constant(100.0).gamma(50.0, ParamFn::constant(200.0));
        assert_eq!(p.eval(0.0), 100.0);
        assert_eq!(p.eval(49.999), 100.0);
        assert_eq!(p.eval(50.0), 200.0);
        assert_eq!(p.eval(1000.0), 200.0);
    }

    #[test]
    fn inflation_adjust_grows_from_start() {
        let p = ParamFn::inflation_adjust(1000.0, 0.03, 0.0);
        assert_eq!(p.eval(-5.0), 1000.0);
        assert!((p.eval(365.0) - 1030.0).abs() < 1e-9);
    }

    #[test]
    fn theta_template_gamma_overrides_named_field() {
        let template = ThetaTemplate::new().with("amount", ParamFn::constant(500.0));
        let overridden = template.gamma(100.0, &[("amount", ParamFn::constant(750.0))]);
        assert_eq!(overridden.at(0.0).get("amount"), 500.0);
        assert_eq!(overridden.at(100.0).get("amount"), 750.0);
    }
}
