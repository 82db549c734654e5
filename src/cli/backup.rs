use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use colored::Colorize;
use rusqlite::backup::Backup;
use rusqlite::Connection;

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::store::{LedgerStore, SqliteStore};

const PAGES_PER_STEP: std::os::raw::c_int = 100;

/// `<data_dir>/backups/basketbook-YYYYMMDD-HHMMSS.db`
fn default_path(data_dir: &Path, at: DateTime<Local>) -> PathBuf {
    data_dir
        .join("backups")
        .join(format!("basketbook-{}.db", at.format("%Y%m%d-%H%M%S")))
}

/// Copy the live ledger database into `dest` and return how many orders the
/// copy holds, read back from the copy itself.
fn copy_ledger(store: &SqliteStore, dest: &Path) -> Result<usize> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    {
        let mut dest_conn = Connection::open(dest)?;
        let backup = Backup::new(store.connection(), &mut dest_conn)?;
        backup.run_to_completion(PAGES_PER_STEP, Duration::from_millis(10), None)?;
    }
    Ok(SqliteStore::at(dest)?.load()?.len())
}

pub fn run(output: Option<String>) -> Result<()> {
    let (data_dir, store) = open_store()?;
    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => default_path(&data_dir, Local::now()),
    };

    let orders = copy_ledger(&store, &dest)?;
    let size = std::fs::metadata(&dest)?.len();
    println!(
        "{} {orders} orders to {} ({})",
        "Backed up".green(),
        dest.display(),
        format_bytes(size)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::{Record, Vendor};

    #[test]
    fn test_default_path_is_timestamped_under_backups() {
        let at = Local.with_ymd_and_hms(2026, 1, 21, 20, 15, 3).unwrap();
        let path = default_path(Path::new("/data"), at);
        assert_eq!(path, PathBuf::from("/data/backups/basketbook-20260121-201503.db"));
    }

    #[test]
    fn test_copy_holds_the_same_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("live")).unwrap();
        let records = vec![Record {
            date: "21 Jan".into(),
            price: 199,
            products: vec!["Milk".into()],
            source: Vendor::Blinkit,
        }];
        store.save(&records).unwrap();

        let dest = dir.path().join("copies").join("ledger.db");
        assert_eq!(copy_ledger(&store, &dest).unwrap(), 1);
        assert_eq!(SqliteStore::at(&dest).unwrap().load().unwrap(), records);
    }
}
