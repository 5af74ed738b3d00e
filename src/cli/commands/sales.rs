use ledger_core::{record_sale, SaleDraft};

use crate::cli::commands::identity::refresh_and_report;
use crate::cli::commands::{parse_number, usage_error};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::system_clock::SystemClock;
use crate::errors::{CommandError, CommandResult};

const RECORD_USAGE: &str = "record <product> <quantity> <unit price> [available stock]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "record",
        "Record a sale for the current identity",
        RECORD_USAGE,
        cmd_record,
    )]
}

fn cmd_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (product, quantity, price, stock) = match args {
        [product, quantity, price] => (product, quantity, price, None),
        [product, quantity, price, stock] => (product, quantity, price, Some(stock)),
        _ => return Err(usage_error(RECORD_USAGE)),
    };

    // Non-positive quantities are left for draft validation to reject.
    let quantity: i64 = parse_number(quantity, "quantity")?;
    let quantity = u32::try_from(quantity.max(0))
        .map_err(|_| CommandError::InvalidArguments("quantity is too large".into()))?;
    let unit_price: f64 = parse_number(price, "unit price")?;
    let stock: Option<u32> = stock
        .map(|raw| parse_number(raw, "available stock"))
        .transpose()?;

    let identity = context.session()?.identity().clone();
    let draft = SaleDraft::new(*product, quantity, unit_price);
    let record = record_sale(&context.store, &identity, draft, stock, &SystemClock)?;

    output::success(format!(
        "Recorded {} x {} for {}.",
        record.quantity,
        record.product_name,
        context.format_amount(f64::from(record.quantity) * record.unit_price)
    ));
    refresh_and_report(context)
}
