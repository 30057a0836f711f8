// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    /// Zero-padded month as the backend expects it ("06").
    pub fn month_param(&self) -> String {
        format!("{:02}", self.month)
    }

    pub fn year_param(&self) -> String {
        self.year.to_string()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        crate::utils::month_end(self.year, self.month).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingPeriod {
    pub month: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Kept as a JSON number with the backend's exact digits.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub sales: Metric,
    #[serde(default)]
    pub collections: Metric,
    #[serde(default)]
    pub returns: Metric,
    #[serde(default)]
    pub replacements: Metric,
}

impl Metrics {
    pub fn named(&self) -> [(&'static str, &Metric); 4] {
        [
            ("Sales", &self.sales),
            ("Collections", &self.collections),
            ("Returns", &self.returns),
            ("Replacements", &self.replacements),
        ]
    }
}

/// The current dashboard aggregate for an account. Only the latest one is kept locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub period: ReportingPeriod,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub item_code: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub qty: Decimal,
    #[serde(default)]
    pub uom: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub discount_percentage: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
}

impl ProductRecord {
    /// Item code usable as a store key; blank codes have no identity.
    pub fn key(&self) -> Option<&str> {
        self.item_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub journey_day: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub company_id: String,
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub territory: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub company_id: String,
    pub user_id: String,
    pub token: String,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Account the dashboard is reported for; falls back to the user id.
    pub fn account_id(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.account_id.as_deref())
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.user_id)
    }
}
