//! API endpoint implementations.
//!
//! Each module adds the operations for one resource family to
//! [`MalloyClient`](crate::MalloyClient).

mod connections;
mod databases;
mod models;
mod packages;
mod projects;
mod queries;
mod schedules;

pub use queries::QueryParams;

/// Query pair for an optional `versionId`, omitted when absent or empty.
pub(crate) fn version_param(version_id: Option<&str>) -> Vec<(&'static str, &str)> {
    match version_id {
        Some(v) if !v.is_empty() => vec![("versionId", v)],
        _ => Vec::new(),
    }
}
