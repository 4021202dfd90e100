//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary with `embed_migrations!` and
//! applied through [`PgClientExt::run_pending_migrations`] at startup.

mod client_ext;
pub(crate) mod custom_hooks;
mod migrate_result;
mod run_migration;

pub use client_ext::PgClientExt;
pub use migrate_result::MigrationResult;
pub use run_migration::run_pending_migrations;
