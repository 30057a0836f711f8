// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::ProductRecord;
use crate::sync::SyncCoordinator;
use crate::utils::{fmt_decimal, maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow};

pub fn handle(sync: &SyncCoordinator, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(sync, sub),
        Some(("export", sub)) => export(&sync.products(), sub),
        _ => Ok(()),
    }
}

fn list(sync: &SyncCoordinator, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(sync.products(), sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                vec![
                    p.key().unwrap_or_default().to_string(),
                    p.description.clone(),
                    p.category.clone(),
                    fmt_decimal(&p.price),
                    format!("{} {}", p.qty.normalize(), p.uom),
                    fmt_decimal(&p.discount_amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Item", "Description", "Category", "Price", "Qty", "Discount"],
                rows,
            )
        );
    }
    Ok(())
}

/// Applies `--category` (case-insensitive) and `--limit` to the cached catalog.
pub fn query_rows(products: Vec<ProductRecord>, sub: &clap::ArgMatches) -> Vec<ProductRecord> {
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    products
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
        .take(limit)
        .collect()
}

pub fn export(products: &[ProductRecord], sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "item_code",
                "description",
                "price",
                "qty",
                "uom",
                "image_url",
                "discount_percentage",
                "discount_amount",
                "category",
                "sub_category",
            ])?;
            for p in products {
                wtr.write_record([
                    p.key().unwrap_or_default().to_string(),
                    p.description.clone(),
                    p.price.to_string(),
                    p.qty.to_string(),
                    p.uom.clone(),
                    p.image_url.clone().unwrap_or_default(),
                    p.discount_percentage.to_string(),
                    p.discount_amount.to_string(),
                    p.category.clone(),
                    p.sub_category.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(products)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} products to {}", products.len(), out);
    Ok(())
}
