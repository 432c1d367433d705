// ABOUTME: Connection lookup resolving stored connections into platform service handles
// ABOUTME: Superseded or cancelled lookups never publish their results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

//! # Connection Lookup
//!
//! [`ConnectionResolver`] performs a single read against the connection store.
//! [`ConnectionLookup`] drives it for a changing key: every new request
//! supersedes the previous one, and only the most recent request may update
//! the published [`LookupState`].
//!
//! Supersession is cooperative. An in-flight store query runs to completion;
//! its result is dropped if a newer request, a cancel, or a drop happened
//! meanwhile.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::PlatformService;
use crate::database::ConnectionStore;
use crate::logging::AppLogger;
use crate::models::{OrganizationId, Platform};

/// Identity of a lookup; any change starts a new one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    /// Platform to resolve
    pub platform: Platform,
    /// Organization context; `None` when the caller has none
    pub organization_id: Option<OrganizationId>,
    /// Specific connection row, when pinned
    pub connection_id: Option<String>,
}

impl ConnectionKey {
    /// Key for an organization's connection to `platform`
    #[must_use]
    pub const fn new(platform: Platform, organization_id: Option<OrganizationId>) -> Self {
        Self {
            platform,
            organization_id,
            connection_id: None,
        }
    }

    /// Pin the lookup to one connection row
    #[must_use]
    pub fn with_connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.connection_id = Some(connection_id.into());
        self
    }
}

/// Published result of a lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupState {
    /// Key this state belongs to; `None` before the first request
    pub key: Option<ConnectionKey>,
    /// Resolved service handle
    pub service: Option<PlatformService>,
    /// Whether a lookup for `key` is in flight
    pub is_loading: bool,
    /// Platform-specific failure message
    pub error: Option<String>,
}

impl LookupState {
    fn loading(key: ConnectionKey) -> Self {
        Self {
            key: Some(key),
            service: None,
            is_loading: true,
            error: None,
        }
    }

    fn resolved(key: ConnectionKey, service: Option<PlatformService>, error: Option<String>) -> Self {
        Self {
            key: Some(key),
            service,
            is_loading: false,
            error,
        }
    }
}

/// One-shot resolution of a [`ConnectionKey`]
#[derive(Clone)]
pub struct ConnectionResolver {
    store: Arc<dyn ConnectionStore>,
}

impl ConnectionResolver {
    /// Create a resolver reading from `store`
    #[must_use]
    pub fn new(store: Arc<dyn ConnectionStore>) -> Self {
        Self { store }
    }

    /// Resolve `key` into a settled state
    ///
    /// Store failures are reported in `error` alongside a disconnected handle;
    /// they are never returned as `Err`.
    pub async fn resolve(&self, key: &ConnectionKey) -> LookupState {
        let Some(organization_id) = key.organization_id else {
            return LookupState::resolved(key.clone(), None, None);
        };

        let platform = key.platform;
        let state = match self
            .store
            .find_connection(organization_id, platform, key.connection_id.as_deref())
            .await
        {
            Ok(Some(connection)) => LookupState::resolved(
                key.clone(),
                Some(PlatformService::authenticated(platform, connection.credentials())),
                None,
            ),
            Ok(None) => LookupState::resolved(
                key.clone(),
                Some(PlatformService::disconnected(platform)),
                None,
            ),
            Err(e) => {
                debug!(error = %e, "Connection store query failed");
                LookupState::resolved(
                    key.clone(),
                    Some(PlatformService::disconnected(platform)),
                    Some(format!("Failed to load {} connection", platform.display_name())),
                )
            }
        };

        AppLogger::log_lookup_event(
            Some(organization_id),
            platform,
            state.service.as_ref().is_some_and(PlatformService::is_connected),
            state.error.as_deref(),
        );
        state
    }
}

/// Stateful, cancellable lookup driver
///
/// Must be used from within a Tokio runtime; each request spawns one task.
pub struct ConnectionLookup {
    resolver: ConnectionResolver,
    state: Arc<watch::Sender<LookupState>>,
    generation: Arc<AtomicU64>,
}

impl ConnectionLookup {
    /// Create an idle lookup
    #[must_use]
    pub fn new(resolver: ConnectionResolver) -> Self {
        let (state, _) = watch::channel(LookupState::default());
        Self {
            resolver,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start resolving `key`, superseding any in-flight lookup
    pub fn request(&self, key: ConnectionKey) {
        // Without an organization there is nothing to query
        if key.organization_id.is_none() {
            self.state.send_modify(|state| {
                self.generation.fetch_add(1, Ordering::SeqCst);
                *state = LookupState::resolved(key, None, None);
            });
            return;
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LookupState::loading(key.clone());
        });

        let resolver = self.resolver.clone();
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        tokio::spawn(async move {
            let resolved = resolver.resolve(&key).await;
            // Compare and publish under the channel lock so a concurrent
            // request or cancel cannot interleave
            state.send_if_modified(|slot| {
                if current.load(Ordering::SeqCst) != generation {
                    debug!(oauth.platform = %key.platform, "Discarding superseded connection lookup");
                    return false;
                }
                *slot = resolved;
                true
            });
        });
    }

    /// Invalidate any in-flight lookup and clear the loading flag
    pub fn cancel(&self) {
        self.state.send_if_modified(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn current(&self) -> LookupState {
        self.state.borrow().clone()
    }

    /// Wait until no lookup is in flight and return the settled state
    pub async fn settled(&self) -> LookupState {
        let mut receiver = self.state.subscribe();
        // The watch::Ref must drop before `receiver` does
        let settled = receiver
            .wait_for(|state| !state.is_loading)
            .await
            .map(|state| (*state).clone());
        settled.unwrap_or_else(|_| self.current())
    }
}

impl Drop for ConnectionLookup {
    fn drop(&mut self) {
        self.state.send_if_modified(|_| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            false
        });
    }
}
