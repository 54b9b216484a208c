//! Repository for the authoritative `servers` set.

use sqlx::PgPool;

use crate::models::server::{NewServer, ServerRow};

/// Column list for `servers`.
const SERVER_COLUMNS: &str = "id, server_name, ip, purpose, os, status, allocated_date, \
     surrendered_date, category, owner, backup_type, backup_frequency, \
     remarks, additional_remarks, created_at, updated_at";

/// Upsert statement keyed by the case-insensitive natural key. Updates
/// replace the record wholesale (including the stored name casing),
/// matching the engine's full-record replacement semantics.
fn upsert_sql() -> String {
    format!(
        "INSERT INTO servers \
            (server_name, ip, purpose, os, status, allocated_date, surrendered_date, \
             category, owner, backup_type, backup_frequency, remarks, additional_remarks) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         ON CONFLICT (lower(btrim(server_name))) DO UPDATE SET \
            server_name = EXCLUDED.server_name, \
            ip = EXCLUDED.ip, \
            purpose = EXCLUDED.purpose, \
            os = EXCLUDED.os, \
            status = EXCLUDED.status, \
            allocated_date = EXCLUDED.allocated_date, \
            surrendered_date = EXCLUDED.surrendered_date, \
            category = EXCLUDED.category, \
            owner = EXCLUDED.owner, \
            backup_type = EXCLUDED.backup_type, \
            backup_frequency = EXCLUDED.backup_frequency, \
            remarks = EXCLUDED.remarks, \
            additional_remarks = EXCLUDED.additional_remarks, \
            updated_at = now() \
         RETURNING {SERVER_COLUMNS}"
    )
}

/// Provides CRUD operations for server inventory records.
pub struct ServerRepo;

impl ServerRepo {
    /// List the full record set, sorted by server name ascending in byte
    /// order (case-sensitive, locale-independent).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ServerRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {SERVER_COLUMNS} FROM servers ORDER BY server_name COLLATE \"C\" ASC"
        );
        sqlx::query_as::<_, ServerRow>(&sql).fetch_all(pool).await
    }

    /// Upsert one record by natural key, returning the stored row.
    pub async fn upsert(pool: &PgPool, input: &NewServer) -> Result<ServerRow, sqlx::Error> {
        let sql = upsert_sql();
        bind_server(sqlx::query_as::<_, ServerRow>(&sql), input)
            .fetch_one(pool)
            .await
    }

    /// Upsert a batch of records in one transaction, so an import is
    /// either fully applied or not applied at all.
    pub async fn upsert_batch(pool: &PgPool, inputs: &[NewServer]) -> Result<u64, sqlx::Error> {
        let sql = upsert_sql();
        let mut tx = pool.begin().await?;
        for input in inputs {
            bind_server(sqlx::query_as::<_, ServerRow>(&sql), input)
                .fetch_one(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        let written = inputs.len() as u64;
        tracing::debug!(written, "Batch upsert committed");
        Ok(written)
    }

    /// Delete one record by natural key. Returns `true` if a row existed.
    pub async fn delete_by_name(pool: &PgPool, server_name: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM servers WHERE lower(btrim(server_name)) = lower(btrim($1))")
                .bind(server_name)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every record ("clear all"). Returns the deleted count.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM servers").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Count records in the set.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM servers")
            .fetch_one(pool)
            .await
    }
}

fn bind_server<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, ServerRow, sqlx::postgres::PgArguments>,
    input: &'q NewServer,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, ServerRow, sqlx::postgres::PgArguments> {
    query
        .bind(&input.server_name)
        .bind(&input.ip)
        .bind(&input.purpose)
        .bind(&input.os)
        .bind(&input.status)
        .bind(input.allocated_date)
        .bind(input.surrendered_date)
        .bind(&input.category)
        .bind(&input.owner)
        .bind(&input.backup_type)
        .bind(&input.backup_frequency)
        .bind(&input.remarks)
        .bind(&input.additional_remarks)
}
