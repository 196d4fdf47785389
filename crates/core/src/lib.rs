//! Domain building blocks shared by the store and API crates: the error
//! taxonomy, entity id types, input normalization rules and the
//! word-frequency analysis used by the report queries.

pub mod error;
pub mod types;
pub mod validation;
pub mod word_frequency;
