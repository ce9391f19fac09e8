//! Job data access and request validation.

pub mod job;
mod validation;
pub use job::{Job, JobFilter, JobService, NewJob, NEW_JOB_RULES, UPDATE_JOB_RULES};
pub use validation::{FieldKind, RequestValidator, ValidationRule, EQUITY_PATTERN};
