// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use thiserror::Error;

/// Raw failure of a remote call, before classification.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request timed out")]
    Timeout,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("invalid account id '{0}'")]
    InvalidAccount(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RemoteError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

/// Errors surfaced to callers of the sync coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SyncError {
    #[error("no network connection and no cached data; connect to the internet and try again")]
    NotConnectedNoLocalData,
    #[error("the requested data is not available on the server; try again later")]
    RemoteUnavailable,
    #[error("network error ({0}); check your connection")]
    Network(String),
    #[error("the server did not respond in time; try again")]
    Timeout,
    #[error("session expired or rejected; sign in again")]
    AuthExpired,
    #[error("local cache unavailable ({0}); no data available")]
    LocalStore(String),
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),
    #[error("a sync for account '{0}' is already running")]
    SyncInProgress(String),
    #[error("'{0}' is not a valid account id")]
    InvalidAccount(String),
    #[error("not signed in; run `salesync login` first")]
    NotLoggedIn,
}

impl From<RemoteError> for SyncError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Timeout => SyncError::Timeout,
            RemoteError::Transport(msg) => SyncError::Network(msg),
            RemoteError::Decode(msg) => SyncError::InvalidResponse(msg),
            RemoteError::InvalidAccount(id) => SyncError::InvalidAccount(id),
            RemoteError::Status { status: 401 | 403, .. } => SyncError::AuthExpired,
            RemoteError::Status { status: 404, .. } => SyncError::RemoteUnavailable,
            RemoteError::Status { status, body } => SyncError::Server {
                status,
                message: body,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("product has no item code")]
    MissingKey,
    #[error("invalid {column} '{value}' for item {item_code}")]
    Corrupt {
        item_code: String,
        column: &'static str,
        value: String,
    },
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        SyncError::LocalStore(err.to_string())
    }
}
