use indexmap::IndexMap;

use crate::models::{Record, Vendor, ALL_VENDORS};

pub const TOP_N: usize = 5;

/// Item tokens shorter than this are label noise ("x", "1L").
const MIN_ITEM_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorSpend {
    pub vendor: Vendor,
    pub spend: u64,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_spend: u64,
    pub order_count: usize,
    pub top_items: Vec<ItemCount>,
    pub top_orders: Vec<Record>,
    pub by_source: Vec<VendorSpend>,
}

/// Sum of prices, pinned at `u64::MAX` instead of overflowing.
pub fn total_spend<'a>(records: impl IntoIterator<Item = &'a Record>) -> u64 {
    records
        .into_iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.price))
}

pub fn summarize(records: &[Record], limit: usize) -> Summary {
    Summary {
        total_spend: total_spend(records),
        order_count: records.len(),
        top_items: top_items(records, limit),
        top_orders: top_orders(records, limit),
        by_source: spend_by_source(records),
    }
}

/// Most frequent item names; ties keep first-seen order.
pub fn top_items(records: &[Record], limit: usize) -> Vec<ItemCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for product in records.iter().flat_map(|r| r.products.iter()) {
        let name = product.trim();
        if name.chars().count() < MIN_ITEM_LEN {
            continue;
        }
        *counts.entry(name).or_default() += 1;
    }
    let mut ranked: Vec<ItemCount> = counts
        .into_iter()
        .map(|(name, count)| ItemCount {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Highest-value orders; equal prices keep ledger order.
pub fn top_orders(records: &[Record], limit: usize) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.price.cmp(&a.price));
    sorted.truncate(limit);
    sorted
}

pub fn spend_by_source(records: &[Record]) -> Vec<VendorSpend> {
    ALL_VENDORS
        .iter()
        .filter_map(|&vendor| {
            let mine: Vec<&Record> = records.iter().filter(|r| r.source == vendor).collect();
            if mine.is_empty() {
                return None;
            }
            Some(VendorSpend {
                vendor,
                spend: total_spend(mine.iter().copied()),
                orders: mine.len(),
            })
        })
        .collect()
}
