//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&dyn Store` as the first argument. Repositories hold the SQL;
//! input validation happens in the services that call them.

pub mod project_repo;
pub mod report_repo;

pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
