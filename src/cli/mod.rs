pub mod backup;
pub mod clear;
pub mod export;
pub mod init;
pub mod list;
pub mod scan;
pub mod status;
pub mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::settings::get_data_dir;
use crate::store::SqliteStore;

/// Open the ledger in the configured data directory, creating it on first use.
pub(crate) fn open_store() -> Result<(PathBuf, SqliteStore)> {
    let data_dir = get_data_dir();
    let store = SqliteStore::open(&data_dir)?;
    Ok((data_dir, store))
}

#[derive(Parser)]
#[command(
    name = "basketbook",
    about = "Scan Zepto, Blinkit and Swiggy order pages into a local spend ledger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the ledger database.
    Init {
        /// Path for basketbook data (default: ~/Documents/basketbook)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Scan a saved order-history page and add its orders to the ledger.
    Scan {
        /// Saved HTML of the rendered page
        page: String,
        /// Address the page was loaded from; picks the vendor
        #[arg(long)]
        url: String,
    },
    /// Total spend, order count, top items and biggest orders.
    Summary,
    /// List every order in the ledger.
    List,
    /// Delete all order history.
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Write the ledger to a CSV file.
    Export {
        /// Output path
        #[arg(long)]
        output: String,
    },
    /// Back up the ledger database.
    Backup {
        /// Output path (default: <data_dir>/backups/basketbook-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the data directory and ledger size.
    Status,
}
