//! Callbacks and hooks for [`diesel`] and [`deadpool`].

use std::time::Instant;

use deadpool::managed::{HookResult, Metrics};
use diesel::ConnectionResult;
use diesel_async::pooled_connection::{PoolError, PoolableConnection};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::{PgConfig, TRACING_TARGET_CONNECTION};

/// Establishes a new connection, logging how long it took.
///
/// See [`ManagerConfig`] for more details.
///
/// [`ManagerConfig`]: diesel_async::pooled_connection::ManagerConfig
pub fn setup_callback<C>(addr: &str) -> BoxFuture<'_, ConnectionResult<C>>
where
    C: AsyncConnection + 'static,
{
    let start = Instant::now();
    let masked_addr = PgConfig::mask_url(addr);

    tracing::debug!(
        target: TRACING_TARGET_CONNECTION,
        hook = "setup_callback",
        addr = %masked_addr,
        "establishing database connection"
    );

    async move {
        let result = C::establish(addr).await;
        let elapsed_ms = start.elapsed().as_millis();

        match &result {
            Ok(_) => tracing::info!(
                target: TRACING_TARGET_CONNECTION,
                hook = "setup_callback",
                addr = %masked_addr,
                elapsed_ms,
                "database connection established"
            ),
            Err(err) => tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                hook = "setup_callback",
                addr = %masked_addr,
                elapsed_ms,
                error = %err,
                "failed to establish database connection"
            ),
        }

        result
    }
    .boxed()
}

/// Called after a new connection has been added to the pool.
pub fn post_create(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    if conn.is_broken() {
        tracing::warn!(
            target: TRACING_TARGET_CONNECTION,
            hook = "post_create",
            created_at = ?metrics.created,
            "connection is broken right after creation"
        );
    }

    Ok(())
}

/// Called before a connection is handed out again.
pub fn pre_recycle(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    tracing::trace!(
        target: TRACING_TARGET_CONNECTION,
        hook = "pre_recycle",
        recycle_count = metrics.recycle_count,
        is_broken = conn.is_broken(),
        "recycling connection"
    );

    Ok(())
}

/// Called after a connection has been recycled.
pub fn post_recycle(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    if conn.is_broken() {
        tracing::error!(
            target: TRACING_TARGET_CONNECTION,
            hook = "post_recycle",
            recycle_count = metrics.recycle_count,
            "connection is broken after recycling"
        );
    }

    Ok(())
}
