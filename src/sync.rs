// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Network-or-cache decisions and the write-through sync.
//!
//! Reads check connectivity up front: when offline they are served from the
//! local store, when online from the backend with no silent fallback. The
//! sync fetches the dashboard and the product catalog and writes each through
//! to the store independently, so one entity failing never blocks the other.

use crate::connectivity::Connectivity;
use crate::error::{RemoteError, SyncError};
use crate::models::{Customer, DashboardSnapshot, LoginRequest, Period, ProductRecord, Session};
use crate::remote::RemoteSource;
use crate::session::SessionStore;
use crate::store::LocalStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Outcome of one sync. Partial failures are reported here, not raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub account_id: String,
    pub dashboard_written: bool,
    pub products_written: usize,
    pub products_skipped: usize,
    pub dashboard_error: Option<SyncError>,
    pub products_error: Option<SyncError>,
    pub synced_at: DateTime<Utc>,
}

impl SyncReport {
    /// Entities that were not written: the dashboard counts as one, plus every skipped product.
    pub fn omissions(&self) -> usize {
        usize::from(!self.dashboard_written) + self.products_skipped
    }
}

#[derive(Debug)]
pub struct LoginOutcome {
    pub session: Session,
    pub sync: Result<SyncReport, SyncError>,
}

pub struct SyncCoordinator {
    remote: Box<dyn RemoteSource>,
    connectivity: Box<dyn Connectivity>,
    store: Mutex<LocalStore>,
    session: Arc<SessionStore>,
    in_flight: Mutex<HashSet<String>>,
}

/// Holds an account's slot in the single-flight registry until dropped.
struct InFlight<'a> {
    registry: &'a Mutex<HashSet<String>>,
    account_id: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.account_id);
    }
}

impl SyncCoordinator {
    pub fn new(
        remote: Box<dyn RemoteSource>,
        connectivity: Box<dyn Connectivity>,
        store: LocalStore,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            remote,
            connectivity,
            store: Mutex::new(store),
            session,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn store(&self) -> MutexGuard<'_, LocalStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_connected(&self) -> bool {
        self.connectivity.is_connected()
    }

    /// Classifies a raw remote failure; a rejected session is dropped here.
    fn classify(&self, err: RemoteError) -> SyncError {
        let classified = SyncError::from(err);
        if classified == SyncError::AuthExpired {
            self.session.invalidate();
        }
        classified
    }

    fn begin(&self, account_id: &str) -> Result<InFlight<'_>, SyncError> {
        let mut running = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !running.insert(account_id.to_string()) {
            return Err(SyncError::SyncInProgress(account_id.to_string()));
        }
        Ok(InFlight {
            registry: &self.in_flight,
            account_id: account_id.to_string(),
        })
    }

    pub fn login(&self, company_id: &str, user_id: &str, password: &str) -> Result<LoginOutcome, SyncError> {
        if !self.connectivity.is_connected() {
            return Err(SyncError::Network("no network connection".into()));
        }
        let req = LoginRequest {
            company_id: company_id.trim().to_string(),
            user_id: user_id.trim().to_string(),
            password: password.to_string(),
        };
        let resp = self.remote.login(&req).map_err(|e| self.classify(e))?;
        let session = Session {
            company_id: req.company_id,
            user_id: req.user_id,
            token: resp.token,
            profile: resp.profile,
            last_synced_at: None,
        };
        self.session
            .save(session.clone())
            .map_err(|e| SyncError::LocalStore(format!("{e:#}")))?;
        tracing::info!(user_id = %session.user_id, "signed in");

        let sync = self.sync_catalog_and_dashboard(session.account_id());
        Ok(LoginOutcome {
            session: self.session.current().unwrap_or(session),
            sync,
        })
    }

    pub fn load_dashboard(
        &self,
        account_id: &str,
        period: Option<&Period>,
    ) -> Result<DashboardSnapshot, SyncError> {
        if !self.connectivity.is_connected() {
            tracing::info!(account_id, "offline; serving cached dashboard");
            return match self.store().latest_dashboard() {
                Ok(Some(snapshot)) => Ok(snapshot),
                Ok(None) => Err(SyncError::NotConnectedNoLocalData),
                Err(err) => {
                    tracing::warn!(error = %err, "cached dashboard unreadable; treating as cache miss");
                    Err(SyncError::NotConnectedNoLocalData)
                }
            };
        }

        tracing::debug!(account_id, ?period, "fetching dashboard");
        match self.remote.dashboard(account_id, period) {
            Ok(Some(snapshot)) => Ok(snapshot),
            Ok(None) => Err(SyncError::RemoteUnavailable),
            Err(err) => {
                let err = self.classify(err);
                tracing::warn!(account_id, error = %err, "dashboard fetch failed");
                Err(err)
            }
        }
    }

    /// Fetches the dashboard and the catalog and writes both through to the
    /// store. Fails only when the backend cannot be used at all: offline,
    /// both fetches failed, or the session was rejected.
    pub fn sync_catalog_and_dashboard(&self, account_id: &str) -> Result<SyncReport, SyncError> {
        let _slot = self.begin(account_id)?;
        if !self.connectivity.is_connected() {
            tracing::warn!(account_id, "sync skipped; no network connection");
            return Err(SyncError::Network("no network connection".into()));
        }

        tracing::debug!(account_id, "sync: fetching");
        let dashboard = self
            .remote
            .dashboard(account_id, None)
            .map_err(|e| self.classify(e));
        if let Err(SyncError::AuthExpired) = dashboard {
            return Err(SyncError::AuthExpired);
        }
        let products = self.remote.products().map_err(|e| self.classify(e));
        if let Err(SyncError::AuthExpired) = products {
            return Err(SyncError::AuthExpired);
        }
        if let (Err(dash_err), Err(prod_err)) = (&dashboard, &products) {
            tracing::warn!(account_id, dashboard = %dash_err, products = %prod_err, "sync failed; backend unreachable");
            return Err(dash_err.clone());
        }

        let mut report = SyncReport {
            account_id: account_id.to_string(),
            dashboard_written: false,
            products_written: 0,
            products_skipped: 0,
            dashboard_error: None,
            products_error: None,
            synced_at: Utc::now(),
        };
        let mut store = self.store();

        match dashboard {
            Ok(Some(snapshot)) => match store.upsert_dashboard(&snapshot) {
                Ok(()) => report.dashboard_written = true,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to cache dashboard");
                    report.dashboard_error = Some(err.into());
                }
            },
            Ok(None) => {
                tracing::info!(account_id, "backend returned no dashboard; keeping cached one");
                report.dashboard_error = Some(SyncError::RemoteUnavailable);
            }
            Err(err) => report.dashboard_error = Some(err),
        }

        match products {
            Ok(records) => match store.upsert_products(&records) {
                Ok(w) => {
                    report.products_written = w.written;
                    report.products_skipped = w.skipped;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to cache products");
                    report.products_skipped = records.len();
                    report.products_error = Some(err.into());
                }
            },
            Err(err) => report.products_error = Some(err),
        }
        drop(store);

        if report.dashboard_written || report.products_written > 0 {
            self.session.record_sync(report.synced_at);
        }
        tracing::info!(
            account_id,
            dashboard = report.dashboard_written,
            products = report.products_written,
            skipped = report.products_skipped,
            "sync finished"
        );
        Ok(report)
    }

    /// Cached catalog. Never touches the network; a local failure reads as empty.
    pub fn products(&self) -> Vec<ProductRecord> {
        match self.store().all_products() {
            Ok(products) => products,
            Err(err) => {
                tracing::warn!(error = %err, "cached products unreadable");
                Vec::new()
            }
        }
    }

    /// Customer list; not cached, so it needs the network.
    pub fn customers(&self, account_id: &str) -> Result<Vec<Customer>, SyncError> {
        if !self.connectivity.is_connected() {
            return Err(SyncError::NotConnectedNoLocalData);
        }
        self.remote
            .customers(account_id)
            .map_err(|e| self.classify(e))
    }
}
