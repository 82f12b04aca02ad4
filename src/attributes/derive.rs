// src/attributes/derive.rs
use super::registry::{FieldDef, Registry};
use super::values::AttributeValueSet;

/// Compute a derived field from the set's current values.
/// `None` for static fields.
pub fn evaluate(def: &FieldDef, set: &AttributeValueSet) -> Option<String> {
    let derivation = def.derivation()?;
    let inputs: Vec<&str> = derivation
        .inputs
        .iter()
        .map(|name| set.get(name).unwrap_or(""))
        .collect();
    Some((derivation.compute)(&inputs))
}

/// Evaluate every derived field of `registry` (declaration order) and store
/// the results in `set`, replacing stale values.
pub fn apply_derived(registry: &Registry, set: &mut AttributeValueSet) {
    for def in registry.derived() {
        if let Some(value) = evaluate(def, set) {
            tracing::trace!(field = def.name(), %value, "derived");
            if let Some(attr) = registry.value(def.name(), value) {
                set.insert(attr);
            }
        }
    }
}
