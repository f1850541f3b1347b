//! Accumulated wire parameters of a single request.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, trace};

use crate::validator::{Field, ValidationError, validate};

/// Mapping from wire name to validated value.
///
/// Values are only ever inserted through [`QueryState::apply`], so every
/// entry has passed its field's validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    params: BTreeMap<&'static str, Value>,
}

impl QueryState {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Validates `value` for `field` and stores it under the field's wire name.
    ///
    /// A later value for the same field replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the value is rejected. The state is
    /// left untouched in that case.
    pub fn apply(&mut self, field: Field, value: Value) -> Result<(), ValidationError> {
        if let Err(err) = validate(field, &value).into_result(field) {
            debug!(field = %field, reason = err.reason(), "parameter rejected");
            return Err(err);
        }
        trace!(field = %field, wire = field.wire_name(), %value, "parameter accepted");
        self.params.insert(field.wire_name(), value);
        Ok(())
    }

    /// Returns the value stored under `wire_name`.
    #[must_use]
    pub fn get(&self, wire_name: &str) -> Option<&Value> {
        self.params.get(wire_name)
    }

    /// Number of stored parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates `(wire_name, value)` pairs in wire-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.params.iter().map(|(k, v)| (*k, v))
    }

    /// Encodes the state as query-string pairs.
    ///
    /// Strings are sent verbatim; booleans and numbers use their JSON text
    /// (`true`, `2005`).
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        self.iter()
            .map(|(k, v)| {
                let encoded = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k, encoded)
            })
            .collect()
    }
}
