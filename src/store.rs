// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::init_schema;
use crate::error::StoreError;
use crate::models::{DashboardSnapshot, ProductRecord};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::collections::HashSet;

pub const DASHBOARD_ROW_ID: i64 = 1;

const UPSERT_PRODUCT: &str = "INSERT INTO products(item_code, description, price, qty, uom, image_url, \
     discount_percentage, discount_amount, category, sub_category)
     VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)
     ON CONFLICT(item_code) DO UPDATE SET
        description=excluded.description,
        price=excluded.price,
        qty=excluded.qty,
        uom=excluded.uom,
        image_url=excluded.image_url,
        discount_percentage=excluded.discount_percentage,
        discount_amount=excluded.discount_amount,
        category=excluded.category,
        sub_category=excluded.sub_category";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductWrite {
    /// Distinct item codes now present from this batch.
    pub written: usize,
    pub skipped: usize,
}

/// Device-local cache: one dashboard row and the product catalog.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Wraps an open connection, creating the cache tables if needed.
    pub fn open(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn upsert_dashboard(&self, snapshot: &DashboardSnapshot) -> Result<(), StoreError> {
        let data = serde_json::to_string(snapshot)?;
        self.conn.execute(
            "INSERT INTO dashboard(id, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET data=excluded.data, updated_at=excluded.updated_at",
            params![DASHBOARD_ROW_ID, data, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn latest_dashboard(&self) -> Result<Option<DashboardSnapshot>, StoreError> {
        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM dashboard WHERE id=?1",
                params![DASHBOARD_ROW_ID],
                |r| r.get(0),
            )
            .optional()?;
        match data {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    pub fn dashboard_updated_at(&self) -> Result<Option<String>, StoreError> {
        let at = self
            .conn
            .query_row(
                "SELECT updated_at FROM dashboard WHERE id=?1",
                params![DASHBOARD_ROW_ID],
                |r| r.get(0),
            )
            .optional()?;
        Ok(at)
    }

    pub fn upsert_product(&self, record: &ProductRecord) -> Result<(), StoreError> {
        let key = record.key().ok_or(StoreError::MissingKey)?;
        write_product(&self.conn, key, record)
    }

    /// Upserts a fetched catalog inside one transaction. Records without an
    /// item code, or whose row fails to write, are counted as skipped. A code
    /// repeated in the batch overwrites its earlier row and counts once.
    pub fn upsert_products(&mut self, records: &[ProductRecord]) -> Result<ProductWrite, StoreError> {
        let tx = self.conn.transaction()?;
        let mut out = ProductWrite::default();
        let mut keys: HashSet<&str> = HashSet::new();
        for (idx, record) in records.iter().enumerate() {
            let Some(key) = record.key() else {
                tracing::warn!(index = idx, "skipping product without item code");
                out.skipped += 1;
                continue;
            };
            match write_product(&tx, key, record) {
                Ok(()) => {
                    if !keys.insert(key) {
                        tracing::debug!(item_code = key, "item code repeated in batch; last one wins");
                    }
                }
                Err(err) => {
                    tracing::warn!(item_code = key, error = %err, "failed to cache product");
                    out.skipped += 1;
                }
            }
        }
        tx.commit()?;
        out.written = keys.len();
        Ok(out)
    }

    pub fn all_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT item_code, description, price, qty, uom, image_url, discount_percentage, \
             discount_amount, category, sub_category FROM products ORDER BY item_code",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(product_from_row(r)?);
        }
        Ok(out)
    }

    pub fn product_count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch("DELETE FROM dashboard; DELETE FROM products;")?;
        Ok(())
    }
}

fn write_product(conn: &Connection, key: &str, r: &ProductRecord) -> Result<(), StoreError> {
    conn.execute(
        UPSERT_PRODUCT,
        params![
            key,
            r.description,
            r.price.to_string(),
            r.qty.to_string(),
            r.uom,
            r.image_url,
            r.discount_percentage.to_string(),
            r.discount_amount.to_string(),
            r.category,
            r.sub_category
        ],
    )?;
    Ok(())
}

fn product_from_row(r: &Row<'_>) -> Result<ProductRecord, StoreError> {
    let item_code: String = r.get(0)?;
    let decimal = |idx: usize, column: &'static str| -> Result<Decimal, StoreError> {
        let raw: String = r.get(idx)?;
        raw.parse::<Decimal>().map_err(|_| StoreError::Corrupt {
            item_code: item_code.clone(),
            column,
            value: raw,
        })
    };
    Ok(ProductRecord {
        description: r.get(1)?,
        price: decimal(2, "price")?,
        qty: decimal(3, "qty")?,
        uom: r.get(4)?,
        image_url: r.get(5)?,
        discount_percentage: decimal(6, "discount_percentage")?,
        discount_amount: decimal(7, "discount_amount")?,
        category: r.get(8)?,
        sub_category: r.get(9)?,
        item_code: Some(item_code.clone()),
    })
}
