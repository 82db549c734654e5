use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::money;
use crate::reports::summarize;
use crate::settings::load_settings;
use crate::store::LedgerStore;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let (_, store) = open_store()?;
    let records = store.load()?;

    if records.is_empty() {
        println!("{}", "No orders yet. Run `basketbook scan` on an orders page.".yellow());
        return Ok(());
    }

    let summary = summarize(&records, settings.top_n);
    let symbol = settings.currency_symbol.as_str();

    println!(
        "{}  {}",
        money(summary.total_spend, symbol).bold(),
        format!("{} Orders", summary.order_count).dimmed()
    );

    let mut items = Table::new();
    items.set_header(vec!["Item", "Count"]);
    for item in &summary.top_items {
        items.add_row(vec![Cell::new(&item.name), Cell::new(format!("{}x", item.count))]);
    }
    println!("\nTop Items\n{items}");

    let mut orders = Table::new();
    orders.set_header(vec!["Source", "Date", "Price"]);
    for order in &summary.top_orders {
        orders.add_row(vec![
            Cell::new(order.source.name()),
            Cell::new(&order.date),
            Cell::new(money(order.price, symbol)),
        ]);
    }
    println!("\nBiggest Orders\n{orders}");

    let mut vendors = Table::new();
    vendors.set_header(vec!["Source", "Orders", "Spend"]);
    for row in &summary.by_source {
        vendors.add_row(vec![
            Cell::new(row.vendor.name()),
            Cell::new(row.orders),
            Cell::new(money(row.spend, symbol)),
        ]);
    }
    println!("\nBy Source\n{vendors}");
    Ok(())
}
