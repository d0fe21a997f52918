//! Record validators

use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::debug;

/// Validates a raw record and constructs a domain object from it
pub trait RecordValidator<T> {
    /// The constructed object, or `None` when the record is invalid
    fn validate_and_construct(&self, record: &JsonValue) -> Option<T>;
}

impl<T, F> RecordValidator<T> for F
where
    F: Fn(&JsonValue) -> Option<T>,
{
    fn validate_and_construct(&self, record: &JsonValue) -> Option<T> {
        self(record)
    }
}

/// Validator accepting any record that deserializes into `T`
pub struct SerdeValidator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeValidator<T> {
    /// Create a serde-backed validator
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SerdeValidator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerdeValidator")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> RecordValidator<T> for SerdeValidator<T> {
    fn validate_and_construct(&self, record: &JsonValue) -> Option<T> {
        match T::deserialize(record) {
            Ok(object) => Some(object),
            Err(e) => {
                debug!("Record rejected as {}: {e}", std::any::type_name::<T>());
                None
            }
        }
    }
}

/// Construct an object from every record the validator accepts
///
/// Output keeps the input order; rejected records are dropped.
pub fn deserialize_records<T, V>(records: &[JsonValue], validator: &V) -> Vec<T>
where
    V: RecordValidator<T> + ?Sized,
{
    let objects: Vec<T> = records
        .iter()
        .filter_map(|record| validator.validate_and_construct(record))
        .collect();

    if objects.len() < records.len() {
        debug!(
            "Skipped {} of {} records that failed validation",
            records.len() - objects.len(),
            records.len()
        );
    }

    objects
}
