// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{catalog, product, snapshot};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use salesync::error::StoreError;
use salesync::store::{LocalStore, ProductWrite};

fn dashboard_rows(store: &LocalStore) -> i64 {
    store
        .connection()
        .query_row("SELECT COUNT(*) FROM dashboard", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn dashboard_is_a_single_overwritten_row() {
    let store = LocalStore::open_in_memory().unwrap();
    assert!(store.latest_dashboard().unwrap().is_none());
    assert_eq!(dashboard_rows(&store), 0);

    store.upsert_dashboard(&snapshot()).unwrap();
    let mut newer = snapshot();
    newer.period.month = "07".into();
    newer.metrics.sales.value = Decimal::new(1500, 0);
    store.upsert_dashboard(&newer).unwrap();

    assert_eq!(dashboard_rows(&store), 1);
    assert_eq!(store.latest_dashboard().unwrap(), Some(newer));
    assert!(store.dashboard_updated_at().unwrap().is_some());
}

#[test]
fn dashboard_table_rejects_a_second_row() {
    let store = LocalStore::open_in_memory().unwrap();
    let res = store.connection().execute(
        "INSERT INTO dashboard(id, data, updated_at) VALUES (2, '{}', '2025-01-01T00:00:00Z')",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn products_upsert_by_item_code() {
    let mut store = LocalStore::open_in_memory().unwrap();
    let first = store.upsert_products(&catalog()).unwrap();
    assert_eq!(first.written, 4);
    let second = store.upsert_products(&catalog()).unwrap();
    assert_eq!(second.written, 4);
    assert_eq!(store.product_count().unwrap(), 4);
}

#[test]
fn upsert_replaces_every_field() {
    let store = LocalStore::open_in_memory().unwrap();
    store
        .upsert_product(&product(Some("SKU-9"), "Old", "Snacks"))
        .unwrap();

    let mut replacement = product(Some("SKU-9"), "New", "Beverages");
    replacement.sub_category = None;
    replacement.image_url = Some("https://cdn.example.com/sku-9.png".into());
    replacement.price = Decimal::new(199, 2);
    store.upsert_product(&replacement).unwrap();

    let all = store.all_products().unwrap();
    assert_eq!(all, vec![replacement]);
}

#[test]
fn item_code_is_trimmed_before_keying() {
    let mut store = LocalStore::open_in_memory().unwrap();
    let w = store
        .upsert_products(&[
            product(Some("SKU-1"), "A", "X"),
            product(Some(" SKU-1 "), "B", "X"),
        ])
        .unwrap();
    // One row, so one write
    assert_eq!(w, ProductWrite { written: 1, skipped: 0 });
    let all = store.all_products().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "B");
    assert_eq!(all[0].item_code.as_deref(), Some("SKU-1"));
}

#[test]
fn product_without_code_is_refused() {
    let store = LocalStore::open_in_memory().unwrap();
    let err = store
        .upsert_product(&product(None, "No code", "Snacks"))
        .unwrap_err();
    assert!(matches!(err, StoreError::MissingKey));
    assert_eq!(store.product_count().unwrap(), 0);
}

#[test]
fn corrupt_price_is_reported() {
    let store = LocalStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO products(item_code, description, price, qty, uom, category) VALUES (?1,'Bad','abc','1','PCS','X')",
            params!["SKU-X"],
        )
        .unwrap();
    let err = store.all_products().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { column: "price", .. }));
}

#[test]
fn clear_empties_both_tables() {
    let mut store = LocalStore::open_in_memory().unwrap();
    store.upsert_dashboard(&snapshot()).unwrap();
    store.upsert_products(&catalog()).unwrap();
    store.clear().unwrap();
    assert!(store.latest_dashboard().unwrap().is_none());
    assert_eq!(store.product_count().unwrap(), 0);
}

#[test]
fn open_is_idempotent_on_existing_schema() {
    let conn = Connection::open_in_memory().unwrap();
    salesync::db::init_schema(&conn).unwrap();
    let store = LocalStore::open(conn).unwrap();
    assert_eq!(store.product_count().unwrap(), 0);
}
