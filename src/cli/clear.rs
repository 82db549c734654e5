use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::open_store;
use crate::error::{BasketError, Result};
use crate::ledger::reset;

pub fn run(yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete all history?")
            .default(false)
            .interact()
            .map_err(|e| BasketError::Other(e.to_string()))?;
    if !confirmed {
        println!("{}", "Nothing deleted.".yellow());
        return Ok(());
    }

    let (_, store) = open_store()?;
    reset(&store)?;
    println!("{}", "Order history cleared.".green());
    Ok(())
}
