//! Envelopes and the `EnvelopeStore` that owns them for the duration of a
//! run (spec.md §3, and the "mutable envelope map" re-architecture note in
//! §9: `append_descriptor` is the only mutation the compile phase may do).

use rustc_hash::FxHashMap;

use crate::error::{CompileError, SimulationError};
use crate::growth::GrowthModel;
use crate::model::{Descriptor, EnvelopeKey, EventId};

/// A named, mutable account/category with a growth model and an ordered
/// sequence of contribution descriptors.
pub struct Envelope {
    pub name: String,
    pub category: String,
    pub growth: GrowthModel,
    pub descriptors: Vec<Descriptor>,
}

impl Envelope {
    pub fn new(name: impl Into<String>, category: impl Into<String>, growth: GrowthModel) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            growth,
            descriptors: Vec::new(),
        }
    }
}

/// Owns every envelope for one simulation run. Envelope names are interned
/// to `EnvelopeKey`s at construction time; descriptors and the resolver
/// carry the cheap `Copy` key instead of cloning strings.
///
/// A fresh `EnvelopeStore` is built per run (spec.md §3's "a new simulation
/// run starts from a fresh envelope map"); compilers append-only during
/// compile, then the store is read-only through evaluation (spec.md §5).
pub struct EnvelopeStore {
    envelopes: Vec<Envelope>,
    by_name: FxHashMap<String, EnvelopeKey>,
}

impl EnvelopeStore {
    pub fn new() -> Self {
        Self {
            envelopes: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn declare(&mut self, name: impl Into<String>, category: impl Into<String>, growth: GrowthModel) -> EnvelopeKey {
        let name = name.into();
        if let Some(&key) = self.by_name.get(&name) {
            return key;
        }
        let key = EnvelopeKey(self.envelopes.len() as u32);
        self.by_name.insert(name.clone(), key);
        self.envelopes.push(Envelope::new(name, category, growth));
        key
    }

    pub fn key(&self, name: &str) -> Option<EnvelopeKey> {
        self.by_name.get(name).copied()
    }

    /// Look up a required envelope, turning a miss into the abort-worthy
    /// `CompileError::MissingRequiredEnvelope` (spec.md §7).
    pub fn require(&self, event_id: EventId, name: &str) -> Result<EnvelopeKey, SimulationError> {
        self.key(name).ok_or_else(|| {
            SimulationError::Compile(CompileError::MissingRequiredEnvelope {
                event_id,
                envelope: name.to_string(),
            })
        })
    }

    pub fn get(&self, key: EnvelopeKey) -> &Envelope {
        &self.envelopes[key.0 as usize]
    }

    pub fn get_mut(&mut self, key: EnvelopeKey) -> &mut Envelope {
        &mut self.envelopes[key.0 as usize]
    }

    /// Append one descriptor to the named envelope's sequence. The only
    /// mutation compilers perform (spec.md §9's `EnvelopeStore` note).
    pub fn append_descriptor(&mut self, envelope: EnvelopeKey, descriptor: Descriptor) {
        self.get_mut(envelope).descriptors.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnvelopeKey, &Envelope)> {
        self.envelopes
            .iter()
            .enumerate()
            .map(|(i, e)| (EnvelopeKey(i as u32), e))
    }

    pub fn keys(&self) -> impl Iterator<Item = EnvelopeKey> + '_ {
        (0..self.envelopes.len()).map(|i| EnvelopeKey(i as u32))
    }
}

impl Default for EnvelopeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_is_idempotent_by_name() {
        let mut store = EnvelopeStore::new();
        let a = store.declare("Cash", "bank", GrowthModel::None);
        let b = store.declare("Cash", "bank", GrowthModel::None);
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn require_fails_for_unknown_envelope() {
        let store = EnvelopeStore::new();
        let err = store.require(EventId(0), "Nope").unwrap_err();
        matches!(err, SimulationError::Compile(CompileError::MissingRequiredEnvelope { .. }));
    }
}
