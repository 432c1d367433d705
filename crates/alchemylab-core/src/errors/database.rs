// ABOUTME: Structured error types for connection store operations
// ABOUTME: Provides domain-specific errors with context for better error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

use thiserror::Error;

/// Errors raised by the connection store
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or acquire a connection
    #[error("Database connection failed: {context}")]
    ConnectionError {
        /// What was being attempted
        context: String,
    },

    /// A query failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// Query description or driver message
        context: String,
    },

    /// Schema migration failed
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Migration step that failed
        context: String,
    },

    /// A stored row could not be mapped into a model
    #[error("Invalid stored value in {field}: {reason}")]
    InvalidData {
        /// Column name
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError {
                    context: error.to_string(),
                }
            }
            sqlx::Error::ColumnDecode { index, source } => Self::InvalidData {
                field: index,
                reason: source.to_string(),
            },
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
