// ABOUTME: PlatformConnection database operations keyed by organization and platform
// ABOUTME: Enforces a single row per (organization, platform) with a unique constraint

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::Database;
use crate::errors::DatabaseError;
use crate::models::{OrganizationId, Platform, PlatformConnection};

const SELECT_COLUMNS: &str = r"
    SELECT id, organization_id, platform, auth_token, refresh_token, token_expiry,
           account_id, connected, created_at, updated_at
    FROM platform_connections
";

impl Database {
    /// Create `platform_connections` table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_platform_connections(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS platform_connections (
                id TEXT PRIMARY KEY,
                organization_id TEXT NOT NULL,
                platform TEXT NOT NULL,
                auth_token TEXT NOT NULL,
                refresh_token TEXT,
                token_expiry DATETIME,
                account_id TEXT,
                connected BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(organization_id, platform)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError {
            context: format!("platform_connections: {e}"),
        })?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_platform_connections_org ON platform_connections(organization_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError {
            context: format!("idx_platform_connections_org: {e}"),
        })?;

        Ok(())
    }

    /// Insert or replace the connection for its `(organization, platform)` pair
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_platform_connection(
        &self,
        connection: &PlatformConnection,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO platform_connections (
                id, organization_id, platform, auth_token, refresh_token,
                token_expiry, account_id, connected, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (organization_id, platform)
            DO UPDATE SET
                id = EXCLUDED.id,
                auth_token = EXCLUDED.auth_token,
                refresh_token = EXCLUDED.refresh_token,
                token_expiry = EXCLUDED.token_expiry,
                account_id = EXCLUDED.account_id,
                connected = EXCLUDED.connected,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(&connection.id)
        .bind(connection.organization_id.to_string())
        .bind(connection.platform.as_str())
        .bind(&connection.auth_token)
        .bind(connection.refresh_token.as_deref())
        .bind(connection.token_expiry)
        .bind(connection.account_id.as_deref())
        .bind(connection.connected)
        .bind(connection.created_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the connection for an organization and platform, optionally pinned to an id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be mapped
    pub async fn get_platform_connection(
        &self,
        organization_id: OrganizationId,
        platform: Platform,
        connection_id: Option<&str>,
    ) -> Result<Option<PlatformConnection>, DatabaseError> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE organization_id = $1 AND platform = $2 AND ($3 IS NULL OR id = $3)"
        );

        let row = sqlx::query(&sql)
            .bind(organization_id.to_string())
            .bind(platform.as_str())
            .bind(connection_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_connection).transpose()
    }

    /// List every connection stored for an organization
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be mapped
    pub async fn list_organization_connections(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<PlatformConnection>, DatabaseError> {
        let sql = format!("{SELECT_COLUMNS} WHERE organization_id = $1 ORDER BY platform");

        let rows = sqlx::query(&sql)
            .bind(organization_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_connection).collect()
    }
}

fn row_to_connection(row: &SqliteRow) -> Result<PlatformConnection, DatabaseError> {
    let organization_id: String = row.try_get("organization_id")?;
    let platform: String = row.try_get("platform")?;

    Ok(PlatformConnection {
        id: row.try_get("id")?,
        organization_id: organization_id
            .parse()
            .map_err(|e: uuid::Error| DatabaseError::InvalidData {
                field: "organization_id".to_owned(),
                reason: e.to_string(),
            })?,
        platform: platform.parse().map_err(|_| DatabaseError::InvalidData {
            field: "platform".to_owned(),
            reason: format!("unknown platform '{platform}'"),
        })?,
        auth_token: row.try_get("auth_token")?,
        refresh_token: row.try_get("refresh_token")?,
        token_expiry: row.try_get::<Option<DateTime<Utc>>, _>("token_expiry")?,
        account_id: row.try_get("account_id")?,
        connected: row.try_get("connected")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
