use std::io::Write;
use std::path::Path;

use crate::cli::open_store;
use crate::error::Result;
use crate::models::Record;
use crate::store::LedgerStore;

/// One row per order: date, price, source, then items joined by "; ".
pub fn write_csv<W: Write>(records: &[Record], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["date", "price", "source", "products"])?;
    for r in records {
        let price = r.price.to_string();
        let products = r.products.join("; ");
        wtr.write_record([r.date.as_str(), price.as_str(), r.source.name(), products.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run(output: &str) -> Result<()> {
    let (_, store) = open_store()?;
    let records = store.load()?;

    let path = Path::new(output);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_csv(&records, std::fs::File::create(path)?)?;
    println!("Wrote {} orders to {}", records.len(), path.display());
    Ok(())
}
