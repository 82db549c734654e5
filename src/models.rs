use std::fmt;

use serde::{Deserialize, Serialize};

/// Store a record came from. Serialized by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    Zepto,
    Blinkit,
    Swiggy,
}

pub const ALL_VENDORS: &[Vendor] = &[Vendor::Zepto, Vendor::Blinkit, Vendor::Swiggy];

impl Vendor {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Zepto => "zepto",
            Self::Blinkit => "blinkit",
            Self::Swiggy => "swiggy",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Zepto => "Zepto",
            Self::Blinkit => "Blinkit",
            Self::Swiggy => "Swiggy",
        }
    }

    /// Pick the vendor whose key appears in the page address.
    pub fn for_url(url: &str) -> Option<Vendor> {
        let url = url.to_lowercase();
        ALL_VENDORS.iter().find(|v| url.contains(v.key())).copied()
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One order as read off a page, before it is tagged with its vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub date: String,
    pub price: u64,
    pub products: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: String,
    pub price: u64,
    pub products: Vec<String>,
    pub source: Vendor,
}

impl Record {
    pub fn from_candidate(candidate: Candidate, source: Vendor) -> Self {
        Self {
            date: candidate.date,
            price: candidate.price,
            products: candidate.products,
            source,
        }
    }

    /// Two records with the same key are treated as the same order,
    /// regardless of products or source.
    pub fn dedup_key(&self) -> (&str, u64) {
        (self.date.as_str(), self.price)
    }
}
