use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::load_settings;
use crate::store::LedgerStore;

pub fn run() -> Result<()> {
    let symbol = load_settings().currency_symbol;
    let (_, store) = open_store()?;
    let records = store.load()?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Source", "Date", "Price", "Items"]);
    for (i, r) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(r.source.name()),
            Cell::new(&r.date),
            Cell::new(money(r.price, &symbol)),
            Cell::new(r.products.join(", ")),
        ]);
    }
    println!("{table}");
    println!("{} orders", records.len());
    Ok(())
}
