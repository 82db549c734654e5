pub mod blinkit;
pub mod swiggy;
pub mod zepto;

use scraper::Html;
use thiserror::Error;
use tracing::{debug, trace};

use crate::models::{Candidate, Vendor};

/// Why a located card did not become a candidate.
#[derive(Error, Debug, PartialEq)]
pub enum CardMiss {
    #[error("no price found in card")]
    NoPrice,
    #[error("card price is zero")]
    ZeroPrice,
}

// ---------------------------------------------------------------------------
// Vendor dispatch
// ---------------------------------------------------------------------------

impl Vendor {
    /// Read every order card on the page. Never fails: cards that cannot be
    /// read are skipped.
    pub fn extract(&self, page: &Html) -> Vec<Candidate> {
        let outcomes = match self {
            Self::Zepto => zepto::extract(page),
            Self::Blinkit => blinkit::extract(page),
            Self::Swiggy => swiggy::extract(page),
        };
        let total = outcomes.len();
        let candidates = keep_valid(outcomes);
        debug!(vendor = %self, cards = total, kept = candidates.len(), "extraction finished");
        candidates
    }
}

fn keep_valid(outcomes: Vec<Result<Candidate, CardMiss>>) -> Vec<Candidate> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            Ok(c) if c.price > 0 => Some(c),
            Ok(_) => {
                trace!(miss = %CardMiss::ZeroPrice, "card skipped");
                None
            }
            Err(miss) => {
                trace!(%miss, "card skipped");
                None
            }
        })
        .collect()
}

/// Build a candidate, refusing zero prices and filling empty item lists.
pub(crate) fn candidate(
    date: Option<String>,
    price: Option<u64>,
    products: Vec<String>,
    fallback_item: &str,
) -> Result<Candidate, CardMiss> {
    let price = price.ok_or(CardMiss::NoPrice)?;
    if price == 0 {
        return Err(CardMiss::ZeroPrice);
    }
    let date = date
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| crate::patterns::UNKNOWN_DATE.to_string());
    let products = if products.is_empty() {
        vec![fallback_item.to_string()]
    } else {
        products
    };
    Ok(Candidate { date, price, products })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_fills_defaults() {
        let c = candidate(None, Some(120), vec![], "Zepto Order").unwrap();
        assert_eq!(c.date, "Unknown");
        assert_eq!(c.products, vec!["Zepto Order".to_string()]);
    }

    #[test]
    fn test_candidate_rejects_missing_and_zero_price() {
        assert_eq!(candidate(Some("1 Jan".into()), None, vec![], "x"), Err(CardMiss::NoPrice));
        assert_eq!(candidate(Some("1 Jan".into()), Some(0), vec![], "x"), Err(CardMiss::ZeroPrice));
    }

    #[test]
    fn test_blank_date_becomes_unknown() {
        let c = candidate(Some("   ".into()), Some(5), vec!["Milk".into()], "x").unwrap();
        assert_eq!(c.date, "Unknown");
    }

    #[test]
    fn test_no_anchors_yields_nothing_for_every_vendor() {
        let page = Html::parse_document("<html><body><h1>Your orders</h1><p>Nothing here yet</p></body></html>");
        for vendor in crate::models::ALL_VENDORS {
            assert!(vendor.extract(&page).is_empty(), "{vendor} found orders on an empty page");
        }
    }

    #[test]
    fn test_every_emitted_candidate_is_valid() {
        let page = Html::parse_document(
            "<div><div class='card'><p>Placed at 3 Feb 2026, 9:00 am</p><p>₹0</p></div>\
             <div class='card'><p>Placed at 4 Feb 2026, 9:00 am</p><p>₹250</p></div>\
             <div class='row'><span>₹75 • 09 Feb</span></div>\
             <div class='o'><h3>Cafe</h3><p>Delivered on Feb 9, 2026</p><p>Total Paid: ₹ 310</p></div></div>",
        );
        for vendor in crate::models::ALL_VENDORS {
            for c in vendor.extract(&page) {
                assert!(c.price > 0);
                assert!(!c.products.is_empty());
                assert!(!c.date.is_empty());
            }
        }
    }
}
