// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Signed-in session and last-sync timestamp, kept beside the cache database
//! rather than inside it. One `SessionStore` is shared by the sync coordinator
//! and the HTTP client for the lifetime of the process.

use crate::models::Session;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Mutex<Option<Session>>,
}

impl SessionStore {
    /// Loads the session file if present. An unreadable file is logged and
    /// treated as signed out.
    pub fn open(path: PathBuf) -> Result<Self> {
        let current = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Read session file {}", path.display()))?;
            match serde_json::from_str::<Session>(&raw) {
                Ok(s) => Some(s),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable session file");
                    None
                }
            }
        } else {
            None
        };
        Ok(Self {
            path: Some(path),
            current: Mutex::new(current),
        })
    }

    /// A session that lives only as long as the process.
    pub fn in_memory(session: Option<Session>) -> Self {
        Self {
            path: None,
            current: Mutex::new(session),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.token.clone())
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.lock().as_ref().and_then(|s| s.last_synced_at)
    }

    pub fn save(&self, session: Session) -> Result<()> {
        let mut guard = self.lock();
        self.persist(Some(&session))?;
        *guard = Some(session);
        Ok(())
    }

    /// Drops the session after the backend rejected it. Never fails; a file
    /// that cannot be removed is logged.
    pub fn invalidate(&self) {
        let mut guard = self.lock();
        if guard.take().is_some() {
            tracing::warn!("session invalidated; sign in again");
        }
        if let Err(err) = self.persist(None) {
            tracing::error!(error = %err, "failed to remove session file");
        }
    }

    pub fn record_sync(&self, at: DateTime<Utc>) {
        let mut guard = self.lock();
        let Some(session) = guard.as_mut() else {
            return;
        };
        session.last_synced_at = Some(at);
        if let Err(err) = self.persist(Some(&*session)) {
            tracing::warn!(error = %err, "failed to record sync time");
        }
    }

    fn persist(&self, session: Option<&Session>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match session {
            Some(s) => {
                fs::write(path, serde_json::to_string_pretty(s)?)
                    .with_context(|| format!("Write session file {}", path.display()))?;
            }
            None => {
                if path.exists() {
                    fs::remove_file(path)
                        .with_context(|| format!("Remove session file {}", path.display()))?;
                }
            }
        }
        Ok(())
    }
}
