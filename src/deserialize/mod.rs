//! Record deserialization module
//!
//! Turns the flat record list produced by the fetcher into domain objects.
//! The construction step is injected as a `RecordValidator`; records it
//! rejects are skipped.

mod validator;

pub use validator::{deserialize_records, RecordValidator, SerdeValidator};

#[cfg(test)]
mod tests;
