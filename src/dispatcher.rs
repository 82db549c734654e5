//! Picks the extractor for the active page, runs it through the host, and
//! folds the result into the ledger. Every outcome ends as a [`ScanStatus`].

use std::fmt;

use tracing::{debug, warn};

use crate::error::{BasketError, Result};
use crate::ledger;
use crate::models::{Candidate, Vendor, ALL_VENDORS};
use crate::store::LedgerStore;

/// The environment that owns the rendered page.
pub trait PageHost {
    /// Address of the page currently shown.
    fn active_url(&self) -> Result<String>;
    /// Run `vendor`'s extractor against the live page.
    fn execute(&self, vendor: Vendor) -> Result<Vec<Candidate>>;
}

/// Whatever shows the user a scan is in progress.
pub trait BusyIndicator {
    /// `Some(label)` while a scan runs, `None` once it is over.
    fn set_busy(&self, label: Option<&str>);
}

/// Holds the busy state for its lifetime; released on every exit path.
pub struct BusyGuard<'a> {
    indicator: &'a dyn BusyIndicator,
}

impl<'a> BusyGuard<'a> {
    pub fn engage(indicator: &'a dyn BusyIndicator, vendor: Vendor) -> Self {
        let label = format!("Scanning {vendor}...");
        indicator.set_busy(Some(label.as_str()));
        Self { indicator }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.set_busy(None);
    }
}

/// Select the extractor for the active page and run it.
pub fn dispatch(host: &dyn PageHost, busy: &dyn BusyIndicator) -> Result<(Vendor, Vec<Candidate>)> {
    let url = host
        .active_url()
        .map_err(|e| BasketError::ExtractionUnavailable(e.to_string()))?;
    let vendor = Vendor::for_url(&url).ok_or_else(|| BasketError::UnsupportedSite(url.clone()))?;
    debug!(%vendor, %url, "dispatching");

    let _guard = BusyGuard::engage(busy, vendor);
    let candidates = host.execute(vendor).map_err(|e| match e {
        BasketError::ExtractionUnavailable(_) => e,
        other => BasketError::ExtractionUnavailable(other.to_string()),
    })?;
    Ok((vendor, candidates))
}

#[derive(Debug)]
pub enum ScanStatus {
    Saved { vendor: Vendor, found: usize, added: usize },
    /// The extractor ran but found nothing; usually more of the page needs
    /// loading.
    Empty { vendor: Vendor },
    Unsupported { url: String },
    Failed(BasketError),
}

impl ScanStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Unsupported { .. } | Self::Failed(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Empty { .. } | Self::Saved { added: 0, .. })
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { added: 0, .. } => write!(f, "No new orders found (duplicates skipped)."),
            Self::Saved { vendor, found, added } => {
                write!(f, "Saved {added} new {vendor} orders ({found} on page).")
            }
            Self::Empty { vendor } => {
                write!(f, "Found 0 {vendor} orders. Try scrolling down to load more, then scan again.")
            }
            Self::Unsupported { .. } => {
                let names: Vec<&str> = ALL_VENDORS.iter().map(|v| v.name()).collect();
                write!(f, "Go to a {} orders page first!", names.join(" / "))
            }
            Self::Failed(BasketError::ExtractionUnavailable(_)) => {
                write!(f, "Error reading page. Reload and try again.")
            }
            Self::Failed(e) => write!(f, "Scan failed: {e}"),
        }
    }
}

/// One user-triggered scan, start to finish. Never returns an error; the
/// status says what happened.
pub fn scan(host: &dyn PageHost, busy: &dyn BusyIndicator, store: &dyn LedgerStore) -> ScanStatus {
    let (vendor, candidates) = match dispatch(host, busy) {
        Ok(found) => found,
        Err(BasketError::UnsupportedSite(url)) => return ScanStatus::Unsupported { url },
        Err(e) => {
            warn!(error = %e, "extraction unavailable");
            return ScanStatus::Failed(e);
        }
    };
    if candidates.is_empty() {
        return ScanStatus::Empty { vendor };
    }
    match ledger::merge(store, candidates, vendor) {
        Ok(result) => ScanStatus::Saved {
            vendor,
            found: result.found,
            added: result.added,
        },
        Err(e) => {
            warn!(error = %e, "ledger merge failed");
            ScanStatus::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::store::MemoryStore;

    struct FakeHost {
        url: Option<&'static str>,
        result: fn() -> Result<Vec<Candidate>>,
        executed: RefCell<Vec<Vendor>>,
    }

    impl FakeHost {
        fn new(url: &'static str, result: fn() -> Result<Vec<Candidate>>) -> Self {
            Self {
                url: Some(url),
                result,
                executed: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageHost for FakeHost {
        fn active_url(&self) -> Result<String> {
            self.url
                .map(str::to_string)
                .ok_or_else(|| BasketError::Other("no active tab".into()))
        }

        fn execute(&self, vendor: Vendor) -> Result<Vec<Candidate>> {
            self.executed.borrow_mut().push(vendor);
            (self.result)()
        }
    }

    #[derive(Default)]
    struct RecordingBusy {
        events: RefCell<Vec<Option<String>>>,
    }

    impl BusyIndicator for RecordingBusy {
        fn set_busy(&self, label: Option<&str>) {
            self.events.borrow_mut().push(label.map(str::to_string));
        }
    }

    fn two_orders() -> Result<Vec<Candidate>> {
        Ok(vec![
            Candidate { date: "21 Jan".into(), price: 199, products: vec!["Milk".into()] },
            Candidate { date: "22 Jan".into(), price: 50, products: vec!["Eggs".into()] },
        ])
    }

    fn no_orders() -> Result<Vec<Candidate>> {
        Ok(Vec::new())
    }

    fn page_gone() -> Result<Vec<Candidate>> {
        Err(BasketError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "tab closed")))
    }

    #[test]
    fn test_scan_saves_new_orders() {
        let host = FakeHost::new("https://blinkit.com/account/orders", two_orders);
        let busy = RecordingBusy::default();
        let store = MemoryStore::default();

        let status = scan(&host, &busy, &store);
        assert!(matches!(status, ScanStatus::Saved { vendor: Vendor::Blinkit, found: 2, added: 2 }));
        assert!(!status.is_failure());
        assert_eq!(store.load().unwrap().len(), 2);
        assert_eq!(
            *busy.events.borrow(),
            vec![Some("Scanning Blinkit...".to_string()), None]
        );
    }

    #[test]
    fn test_rescan_reports_duplicates() {
        let host = FakeHost::new("https://www.zeptonow.com/account/orders", two_orders);
        let busy = RecordingBusy::default();
        let store = MemoryStore::default();
        scan(&host, &busy, &store);
        let status = scan(&host, &busy, &store);
        assert!(matches!(status, ScanStatus::Saved { added: 0, .. }));
        assert!(status.is_warning());
        assert_eq!(status.to_string(), "No new orders found (duplicates skipped).");
    }

    #[test]
    fn test_unsupported_site_runs_nothing() {
        let host = FakeHost::new("https://www.amazon.in/orders", two_orders);
        let busy = RecordingBusy::default();
        let store = MemoryStore::default();

        let status = scan(&host, &busy, &store);
        assert!(matches!(status, ScanStatus::Unsupported { .. }));
        assert!(status.is_failure());
        assert!(host.executed.borrow().is_empty());
        assert!(busy.events.borrow().is_empty());
        assert_eq!(status.to_string(), "Go to a Zepto / Blinkit / Swiggy orders page first!");
    }

    #[test]
    fn test_empty_result_is_a_warning() {
        let host = FakeHost::new("https://www.swiggy.com/my-account/orders", no_orders);
        let busy = RecordingBusy::default();
        let store = MemoryStore::default();

        let status = scan(&host, &busy, &store);
        assert!(matches!(status, ScanStatus::Empty { vendor: Vendor::Swiggy }));
        assert!(!status.is_failure());
        assert!(status.is_warning());
        assert_eq!(*store.writes.borrow(), 0);
    }

    #[test]
    fn test_host_failure_releases_busy_state() {
        let host = FakeHost::new("https://blinkit.com/account/orders", page_gone);
        let busy = RecordingBusy::default();
        let store = MemoryStore::default();

        let status = scan(&host, &busy, &store);
        assert!(matches!(status, ScanStatus::Failed(BasketError::ExtractionUnavailable(_))));
        assert_eq!(status.to_string(), "Error reading page. Reload and try again.");
        assert_eq!(busy.events.borrow().last(), Some(&None));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_missing_url_is_unavailable() {
        let host = FakeHost {
            url: None,
            result: two_orders,
            executed: RefCell::new(Vec::new()),
        };
        let busy = RecordingBusy::default();
        let err = dispatch(&host, &busy).unwrap_err();
        assert!(matches!(err, BasketError::ExtractionUnavailable(_)));
    }
}
