use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::reports::total_spend;
use crate::settings::load_settings;
use crate::store::{LedgerStore, SqliteStore, DB_FILE};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILE);

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let records = SqliteStore::open(&data_dir)?.load()?;
        let spend = total_spend(&records);
        println!();
        println!("Orders:     {}", records.len());
        println!("Spend:      {}", money(spend, &settings.currency_symbol));
    } else {
        println!();
        println!("Database not found. Run `basketbook init` or `basketbook scan` to set up.");
    }

    Ok(())
}
