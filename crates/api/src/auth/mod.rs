//! Authentication primitives.
//!
//! - [`token`] -- Shared bearer secret with constant-time verification.

pub mod token;
