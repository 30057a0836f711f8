// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::error::RemoteError;
use crate::models::{Customer, DashboardSnapshot, LoginRequest, LoginResponse, Period, ProductRecord};
use crate::session::SessionStore;
use crate::utils::http_client;
use anyhow::{Result, anyhow};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// The backend as seen by the sync coordinator.
pub trait RemoteSource: Send + Sync {
    fn login(&self, req: &LoginRequest) -> Result<LoginResponse, RemoteError>;

    /// `Ok(None)` when the backend answers with an empty dashboard.
    fn dashboard(
        &self,
        account_id: &str,
        period: Option<&Period>,
    ) -> Result<Option<DashboardSnapshot>, RemoteError>;

    fn customers(&self, account_id: &str) -> Result<Vec<Customer>, RemoteError>;

    fn products(&self) -> Result<Vec<ProductRecord>, RemoteError>;
}

pub struct HttpRemote {
    client: Client,
    base: Url,
    session: Arc<SessionStore>,
}

impl HttpRemote {
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        let base = Url::parse(config.api_url.trim())
            .map_err(|err| anyhow!("Invalid API URL '{}': {}", config.api_url, err))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("API URL '{}' cannot take a path", config.api_url));
        }
        Ok(Self {
            client: http_client(config.timeout())?,
            base,
            session,
        })
    }

    /// Base URL plus path segments. Each segment is percent-encoded, so ids
    /// containing `/`, `?` or `#` stay inside their own segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        let url = self.url(segments);
        tracing::debug!(path = url.path(), "GET");
        let req = self.authorized(self.client.get(url).query(query));
        decode(req.send()?)
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, RemoteError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let text = resp.text()?;
    // An empty 2xx body reads as JSON null
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|err| RemoteError::Decode(err.to_string()))
}

/// Dot segments and blanks would be dropped or resolved by the URL parser,
/// addressing a different resource than the account asked for.
fn account_segment(account_id: &str) -> Result<&str, RemoteError> {
    match account_id.trim() {
        "" | "." | ".." => Err(RemoteError::InvalidAccount(account_id.to_string())),
        _ => Ok(account_id),
    }
}

impl RemoteSource for HttpRemote {
    fn login(&self, req: &LoginRequest) -> Result<LoginResponse, RemoteError> {
        tracing::debug!(user_id = %req.user_id, "POST /auth/login");
        let resp = self.client.post(self.url(&["auth", "login"])).json(req).send()?;
        decode(resp)
    }

    fn dashboard(
        &self,
        account_id: &str,
        period: Option<&Period>,
    ) -> Result<Option<DashboardSnapshot>, RemoteError> {
        let query: Vec<(&str, String)> = match period {
            Some(p) => vec![("month", p.month_param()), ("year", p.year_param())],
            None => Vec::new(),
        };
        self.get(&["dashboard", account_segment(account_id)?], &query)
    }

    fn customers(&self, account_id: &str) -> Result<Vec<Customer>, RemoteError> {
        self.get(&["customers"], &[("accountId", account_id.to_string())])
    }

    fn products(&self) -> Result<Vec<ProductRecord>, RemoteError> {
        self.get(&["products"], &[])
    }
}
