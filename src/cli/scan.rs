use std::path::PathBuf;

use colored::Colorize;
use scraper::Html;

use crate::cli::open_store;
use crate::dispatcher::{scan, BusyIndicator, PageHost};
use crate::error::{BasketError, Result};
use crate::models::{Candidate, Vendor};

/// A rendered page saved to disk, together with the address it came from.
pub struct SnapshotHost {
    pub url: String,
    pub path: PathBuf,
}

impl PageHost for SnapshotHost {
    fn active_url(&self) -> Result<String> {
        Ok(self.url.clone())
    }

    fn execute(&self, vendor: Vendor) -> Result<Vec<Candidate>> {
        let html = std::fs::read_to_string(&self.path).map_err(|e| {
            BasketError::ExtractionUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        if html.trim().is_empty() {
            return Err(BasketError::ExtractionUnavailable(format!(
                "{} is empty",
                self.path.display()
            )));
        }
        let page = Html::parse_document(&html);
        Ok(vendor.extract(&page))
    }
}

/// Progress line on stderr while a scan runs.
struct TerminalBusy;

impl BusyIndicator for TerminalBusy {
    fn set_busy(&self, label: Option<&str>) {
        if let Some(label) = label {
            eprintln!("{}", label.dimmed());
        }
    }
}

pub fn run(page: &str, url: &str) -> Result<()> {
    let (_, store) = open_store()?;
    let host = SnapshotHost {
        url: url.to_string(),
        path: PathBuf::from(page),
    };

    let status = scan(&host, &TerminalBusy, &store);
    let line = if status.is_failure() {
        status.to_string().red()
    } else if status.is_warning() {
        status.to_string().yellow()
    } else {
        status.to_string().green()
    };
    println!("{line}");

    // The status line is the whole report; failures only set the exit code.
    if status.is_failure() {
        drop(store);
        std::process::exit(1);
    }
    Ok(())
}
