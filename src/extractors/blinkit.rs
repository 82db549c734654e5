//! Blinkit order history. There is no label to anchor on; each order shows a
//! single text leaf like "₹123 • 08 Feb", and product thumbnails sit a few
//! levels above it.

use scraper::{ElementRef, Html};

use super::{candidate, CardMiss};
use crate::models::Candidate;
use crate::patterns::{parse_price, PRICE_THEN_DAY_MONTH};
use crate::tree::{collect_items, inner_text, is_leaf, locate_cards, ItemRules};

const ITEMS: ItemRules = ItemRules {
    placeholder: "Blinkit Item",
    min_width: 30,
    probe_levels: 6,
    alt_noise: &[],
    src_noise: &["arrow", "clock", "icon", "star"],
};

const ORDER_PLACEHOLDER: &str = "Blinkit Order";

fn is_summary_leaf(el: ElementRef<'_>) -> bool {
    is_leaf(el) && PRICE_THEN_DAY_MONTH.is_match(&inner_text(el))
}

fn within_one_order(el: ElementRef<'_>) -> bool {
    PRICE_THEN_DAY_MONTH.find_iter(&inner_text(el)).count() <= 1
}

pub(super) fn extract(page: &Html) -> Vec<Result<Candidate, CardMiss>> {
    // The summary leaf is its own card.
    let cards = locate_cards(page, is_summary_leaf, |text| PRICE_THEN_DAY_MONTH.is_match(text), 0);
    cards
        .into_iter()
        .map(|leaf| {
            let text = inner_text(leaf);
            let caps = PRICE_THEN_DAY_MONTH.captures(&text);
            let price = caps.as_ref().map(|c| parse_price(&c[1]));
            let date = caps.as_ref().map(|c| c[2].to_string());
            let products = collect_items(leaf, &ITEMS, within_one_order);
            candidate(date, price, products, ORDER_PLACEHOLDER)
        })
        .collect()
}
