use ledger_core::PageOutcome;
use ledger_domain::Displayable;

use crate::cli::commands::{parse_number, usage_error};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::cli::shell_context::ShellContext;
use crate::errors::CommandResult;

const PAGE_USAGE: &str = "page <number>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "show",
            "Show the sales of the month on the current page",
            "show",
            cmd_show,
        ),
        CommandEntry::new("page", "Jump to a page (1 = newest month)", PAGE_USAGE, cmd_page),
        CommandEntry::new("next", "Move to the next (older) month", "next", cmd_next),
        CommandEntry::new(
            "prev",
            "Move to the previous (newer) month",
            "prev",
            cmd_prev,
        ),
        CommandEntry::new(
            "periods",
            "List the years and months that can be exported",
            "periods [year]",
            cmd_periods,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    show_current(context)
}

fn cmd_page(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(PAGE_USAGE));
    };
    let page: usize = parse_number(raw, "page number")?;
    let outcome = context.session_mut()?.go_to_page(page);
    after_move(context, outcome)
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = context.session_mut()?.next();
    after_move(context, outcome)
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = context.session_mut()?.previous();
    after_move(context, outcome)
}

fn after_move(context: &ShellContext, outcome: PageOutcome) -> CommandResult {
    match outcome {
        PageOutcome::Moved { .. } => show_current(context),
        PageOutcome::AtBoundary => {
            output::info("Already at the edge of the ledger.");
            Ok(())
        }
        PageOutcome::OutOfRange {
            requested,
            total_pages,
        } => {
            output::warning(format!(
                "Page {requested} does not exist; choose between 1 and {total_pages}."
            ));
            Ok(())
        }
    }
}

fn show_current(context: &ShellContext) -> CommandResult {
    let session = context.session()?;
    output::section(format!("Sales Record for {}", session.current_label()));

    match session.current_bucket() {
        Some(bucket) if !bucket.is_empty() => {
            output::block(&render::bucket_table(
                bucket,
                &context.config.currency_symbol,
            ));
            output::info(format!(
                "{} sale(s), {} unit(s), revenue {}",
                bucket.len(),
                bucket.units_sold(),
                context.format_amount(bucket.revenue())
            ));
        }
        Some(bucket) => {
            output::info(format!("No sales recorded for {}.", bucket.display_label()));
        }
        None => output::info("No sales loaded."),
    }

    output::info(render::pagination_bar(session.pagination()));
    Ok(())
}

fn cmd_periods(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let view = context.session()?.ledger_view();
    let years = match args.first() {
        Some(raw) => vec![parse_number::<i32>(raw, "year")?],
        None => view.years(),
    };

    output::section("Available periods");
    for year in years {
        let months: Vec<&str> = view
            .months_in(year)
            .iter()
            .map(|period| period.month_name())
            .collect();
        if months.is_empty() {
            output::info(format!("  {year}: no data"));
        } else {
            output::info(format!("  {year}: {}", months.join(", ")));
        }
    }
    Ok(())
}
