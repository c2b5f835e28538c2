//! Mutation errors keyed by form field.

use std::collections::HashMap;

use crate::saleor::FieldScoped;

/// Field name to message map built once per mutation response.
///
/// Only fields the receiving form renders are kept. Everything else (unknown
/// field names, errors without a field) is logged at `warn` and dropped from
/// the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    by_field: HashMap<String, String>,
}

impl FieldErrors {
    /// No errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort mutation errors into the fields named in `fields`.
    ///
    /// When a field has several errors the first one is shown.
    #[must_use]
    pub fn collect<E: FieldScoped>(errors: &[E], fields: &[&str]) -> Self {
        let mut by_field = HashMap::new();

        for error in errors {
            match error.field() {
                Some(field) if fields.contains(&field) => {
                    by_field
                        .entry(field.to_string())
                        .or_insert_with(|| error.message());
                }
                field => {
                    tracing::warn!(
                        field = field.unwrap_or("<none>"),
                        message = %error.message(),
                        "Mutation error has no matching form field"
                    );
                }
            }
        }

        Self { by_field }
    }

    /// Message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.by_field.get(field).map(String::as_str)
    }

    /// Message for `field`, or an empty string for templates.
    #[must_use]
    pub fn message(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }

    /// Whether no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Record an error for one field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.by_field.insert(field.into(), message.into());
    }
}
