//! Schema migrations.
//!
//! Each migration runs once; applied names are recorded in the `migrations`
//! table.

use anyhow::Context;
use rusqlite::{params, Connection};

const SETTINGS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
);
";

/// Migrations in application order, as (name, sql).
const MIGRATIONS: &[(&str, &str)] = &[("001_settings", SETTINGS_TABLE)];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS migrations (
            name TEXT PRIMARY KEY,
            applied_at INTEGER NOT NULL DEFAULT (unixepoch())
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        if is_applied(conn, name)? {
            continue;
        }
        tracing::info!(migration = %name, "Applying migration");
        conn.execute_batch(sql)
            .with_context(|| format!("Migration {name} failed"))?;
        conn.execute("INSERT INTO migrations (name) VALUES (?1)", params![name])?;
    }

    Ok(())
}

fn is_applied(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM migrations WHERE name = ?1)",
        params![name],
        |row| row.get(0),
    )
}
