//! Hooks run around [`run_pending_migrations`].
//!
//! [`run_pending_migrations`]: super::run_pending_migrations

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::PoolableConnection;

use crate::{PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Refuses to migrate over a connection that is already broken.
pub async fn pre_migrate(conn: &mut AsyncPgConnection) -> PgResult<()> {
    if conn.is_broken() {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            hook = "pre_migrate",
            "connection is broken before migrations"
        );
        return Err(PgError::Migration(
            "connection is broken before migrations".into(),
        ));
    }

    tracing::debug!(
        target: TRACING_TARGET_MIGRATION,
        hook = "pre_migrate",
        "connection ready for migrations"
    );
    Ok(())
}

/// Logs the connection state once migrations have run.
pub async fn post_migrate(conn: &mut AsyncPgConnection) -> PgResult<()> {
    if conn.is_broken() {
        tracing::warn!(
            target: TRACING_TARGET_MIGRATION,
            hook = "post_migrate",
            "connection is broken after migrations"
        );
    }

    Ok(())
}
