//! Validation and consistency layer between the handlers and the store.
//!
//! Services trim and validate every input, enforce that reports only ever
//! reference existing projects, and re-read entities after each update so
//! callers always see what the store holds.

pub mod project;
pub mod report;

pub use project::ProjectService;
pub use report::ReportService;
