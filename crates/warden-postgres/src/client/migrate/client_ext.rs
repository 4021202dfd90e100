//! Migration methods on [`PgClient`].

use super::{MigrationResult, run_pending_migrations};
use crate::{PgClient, PgResult};

/// Extension trait providing migration functionality for [`PgClient`].
pub trait PgClientExt {
    /// Applies every embedded migration that has not run yet.
    ///
    /// Safe to call on every startup.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;
}

impl PgClientExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }
}
