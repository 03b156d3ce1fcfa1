// Declarative required-field validation for create requests.
//
// Each entity declares its mandatory creation fields as a constant list next
// to the type. The registry is immutable: nothing registers fields at runtime
// and nothing mutates the lists after startup.

use serde_json::{Map, Value};

/// Implemented by every persisted entity that accepts create requests.
pub trait Entity {
    /// Entity name as it appears in client-facing messages ("Board", ...).
    const KIND: &'static str;

    /// Required creation fields, wire names, in declaration order.
    const REQUIRED_FIELDS: &'static [&'static str];
}

/// Returns the required fields of `T` that are not supplied in `body`,
/// preserving declaration order.
///
/// A field counts as supplied only when the key is present and its value is
/// neither `null` nor an empty string, so `{"boardName": ""}` is still
/// rejected. Pure function; an empty body yields the full required list.
pub fn missing_required_fields<T: Entity>(body: &Map<String, Value>) -> Vec<&'static str> {
    T::REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !is_supplied(body.get(*field)))
        .collect()
}

/// Shared supplied-ness semantics: present, non-null, non-empty.
pub(crate) fn is_supplied(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
