use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::{SqliteStore, DB_FILE};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    SqliteStore::open(&resolved)?;
    std::fs::create_dir_all(resolved.join("backups"))?;

    println!("Initialized basketbook at {}", resolved.join(DB_FILE).display());
    Ok(())
}
