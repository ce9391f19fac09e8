//! HTTP handlers for the jobs resource.

pub mod jobs;
pub use jobs::*;
