//! Zepto order history. Each order card carries a single "Placed at <date>"
//! line and a rupee total; product thumbnails carry their names as alt text.

use scraper::{ElementRef, Html};

use super::{candidate, CardMiss};
use crate::models::Candidate;
use crate::patterns::{count_marker, first_price, short_name, PLACED_AT, PRICE};
use crate::tree::{collect_items, inner_text, locate_cards, own_text, ItemRules};

const MARKER: &str = "Placed at";
const MAX_ASCENT: usize = 6;

const ITEMS: ItemRules = ItemRules {
    placeholder: "Zepto Item",
    min_width: 30,
    probe_levels: 3,
    alt_noise: &["arrow", "icon", "status"],
    src_noise: &[".svg"],
};

const ORDER_PLACEHOLDER: &str = "Zepto Order";

/// Price present, and exactly one order inside.
fn is_card(text: &str) -> bool {
    PRICE.is_match(text) && count_marker(text, MARKER) == 1
}

fn within_one_order(el: ElementRef<'_>) -> bool {
    count_marker(&inner_text(el), MARKER) <= 1
}

/// "Placed at 21 Jan 2026, 8:15 pm" -> "21 Jan 2026"
fn placed_date(text: &str) -> Option<String> {
    let caps = PLACED_AT.captures(text)?;
    caps[1].split(',').next().map(|d| d.trim().to_string())
}

pub(super) fn extract(page: &Html) -> Vec<Result<Candidate, CardMiss>> {
    let cards = locate_cards(page, |el| own_text(el).contains(MARKER), is_card, MAX_ASCENT);
    cards
        .into_iter()
        .map(|card| {
            let text = inner_text(card);
            let products = collect_items(card, &ITEMS, within_one_order)
                .iter()
                .map(|name| short_name(name))
                .filter(|name| !name.is_empty())
                .collect();
            candidate(placed_date(&text), first_price(&text), products, ORDER_PLACEHOLDER)
        })
        .collect()
}
