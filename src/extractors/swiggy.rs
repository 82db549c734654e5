//! Swiggy food orders. Cards read "Delivered on <date>" and "Total Paid: ₹ N";
//! the item slot holds the restaurant name, taken from the card's heading.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use super::{candidate, CardMiss};
use crate::models::Candidate;
use crate::patterns::{count_marker, parse_price, DELIVERED_ON, TOTAL_PAID};
use crate::tree::{ascend, inner_text, locate_cards, own_text};

const MARKER: &str = "Delivered on";
const MAX_ASCENT: usize = 5;
const HEADING_PROBE: usize = 3;
const ORDER_PLACEHOLDER: &str = "Swiggy Order";

lazy_static! {
    static ref HEADING: Selector =
        Selector::parse(r#"h1, h2, h3, h4, h5, h6, [role="heading"]"#).unwrap();
}

fn is_card(text: &str) -> bool {
    TOTAL_PAID.is_match(text) && count_marker(text, MARKER) == 1
}

fn restaurant(card: ElementRef<'_>) -> Option<String> {
    let scope = ascend(card, HEADING_PROBE, |el| {
        count_marker(&inner_text(el), MARKER) <= 1 && el.select(&HEADING).next().is_some()
    })?;
    let heading = scope.select(&HEADING).next()?;
    inner_text(heading)
        .lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|name| !name.is_empty())
}

pub(super) fn extract(page: &Html) -> Vec<Result<Candidate, CardMiss>> {
    let cards = locate_cards(page, |el| own_text(el).contains(MARKER), is_card, MAX_ASCENT);
    cards
        .into_iter()
        .map(|card| {
            let text = inner_text(card);
            let price = TOTAL_PAID.captures(&text).map(|c| parse_price(&c[1]));
            let date = DELIVERED_ON.captures(&text).map(|c| c[1].to_string());
            let products = restaurant(card).into_iter().collect();
            candidate(date, price, products, ORDER_PLACEHOLDER)
        })
        .collect()
}
