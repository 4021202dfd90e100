//! Outcome of migration runs.

use std::time::Duration;

/// Outcome of [`run_pending_migrations`].
///
/// [`run_pending_migrations`]: super::run_pending_migrations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the run
    pub duration: Duration,
    /// Versions applied during this run
    pub processed_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a successful migration result.
    pub fn success(duration: Duration, processed_versions: Vec<String>) -> Self {
        Self {
            duration,
            processed_versions,
        }
    }
}

