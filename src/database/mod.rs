// ABOUTME: SQLite-backed connection store for organization platform connections
// ABOUTME: Owns the pool, runs schema migrations, and exposes the read-only store trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! # Database Management
//!
//! Stores one row per `(organization, platform)` connection. Rows are written by
//! the code-exchange step; this service reads them to build platform services.

mod platform_connections;

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::errors::DatabaseError;
use crate::models::{OrganizationId, Platform, PlatformConnection};

/// Read-only access to stored platform connections
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Find the connection for an organization and platform
    ///
    /// When `connection_id` is given, the row must also carry that id.
    async fn find_connection(
        &self,
        organization_id: OrganizationId,
        platform: Platform,
        connection_id: Option<&str>,
    ) -> Result<Option<PlatformConnection>, DatabaseError>;
}

/// Database manager for connection storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a migration fails
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Invalid database URL: {e}"),
            })?
            .create_if_missing(true);

        // Every connection to an in-memory database gets its own empty database
        let in_memory = database_url.contains(":memory:");
        let max_connections = if in_memory { 1 } else { 5 };

        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        DatabaseError::ConnectionError {
                            context: format!("Failed to create {}: {e}", parent.display()),
                        }
                    })?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: e.to_string(),
            })?;

        let db = Self { pool };
        db.migrate().await?;
        debug!("Connection store ready");
        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.migrate_platform_connections().await
    }

    /// Check that the store answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ConnectionStore for Database {
    async fn find_connection(
        &self,
        organization_id: OrganizationId,
        platform: Platform,
        connection_id: Option<&str>,
    ) -> Result<Option<PlatformConnection>, DatabaseError> {
        self.get_platform_connection(organization_id, platform, connection_id)
            .await
    }
}
