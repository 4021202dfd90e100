use std::ops::DerefMut;
use std::time::Instant;

use diesel::migration::{Migration, MigrationName};
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use super::{MigrationResult, custom_hooks};
use crate::{MIGRATIONS, PgClient, PgError, PgResult, PooledConnection, TRACING_TARGET_MIGRATION};

/// Applies all pending embedded migrations.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationResult> {
    let start_time = Instant::now();
    let mut conn = pg.get_pooled_connection().await?;

    custom_hooks::pre_migrate(conn.deref_mut()).await?;

    let mut conn: AsyncConnectionWrapper<PooledConnection> = conn.into();
    let (results, mut conn) = spawn_blocking(move || {
        let results = (|| {
            let pending = conn
                .pending_migrations(MIGRATIONS)?
                .iter()
                .map(|migration| migration.name().version().to_string())
                .collect::<Vec<_>>();

            if pending.is_empty() {
                return Ok(Vec::new());
            }

            tracing::info!(
                target: TRACING_TARGET_MIGRATION,
                pending = ?pending,
                "applying pending migrations"
            );

            conn.run_pending_migrations(MIGRATIONS).map(|versions| {
                versions
                    .into_iter()
                    .map(|version| version.to_string())
                    .collect::<Vec<_>>()
            })
        })();

        (results, conn)
    })
    .await
    .map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            error = %err,
            "migration task panicked"
        );
        PgError::Migration(err.into())
    })?;

    custom_hooks::post_migrate(conn.deref_mut()).await?;

    let duration = start_time.elapsed();
    let versions = results.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = %err,
            "database migration failed"
        );
        PgError::Migration(err)
    })?;

    if versions.is_empty() {
        tracing::info!(target: TRACING_TARGET_MIGRATION, "database schema is up to date");
    } else {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            applied = versions.len(),
            "database migrations applied"
        );
    }

    Ok(MigrationResult::success(duration, versions))
}
