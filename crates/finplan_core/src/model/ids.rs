//! Unique identifiers for simulation entities
//!
//! Each entity type has its own ID type to provide type safety and prevent
//! mixing up different kinds of identifiers.

use serde::{Deserialize, Serialize};

/// Interned handle to an envelope name.
///
/// Envelope names are plan-authored strings; interning them once at plan
/// compile time means descriptors and the resolver can carry a `Copy` key
/// instead of cloning `String`s through the hot evaluation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnvelopeKey(pub u32);

/// Unique identifier for an Event within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u32);
