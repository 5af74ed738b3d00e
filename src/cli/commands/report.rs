use std::{fs, path::Path};

use ledger_core::render_table;
use ledger_domain::{Displayable, PeriodKey, ReportScope};
use tracing::info;

use crate::cli::commands::usage_error;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};

const EXPORT_USAGE: &str = "export all|<YYYY-MM> [path]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Build a sales report for all months or one month",
        EXPORT_USAGE,
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (scope, target) = match args {
        [scope] => (parse_scope(scope)?, None),
        [scope, path] => (parse_scope(scope)?, Some(Path::new(*path))),
        _ => return Err(usage_error(EXPORT_USAGE)),
    };

    let report = context.session()?.export_report(scope);
    if report.is_empty() {
        output::warning(format!("No sales found for {}.", scope.display_label()));
    }

    let table = render_table(&report);
    match target {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &table)?;
            info!(%scope, path = %path.display(), lines = report.lines.len(), "report written");
            output::success(format!("Report written to {}", path.display()));
        }
        None => output::block(&table),
    }
    Ok(())
}

fn parse_scope(raw: &str) -> Result<ReportScope, CommandError> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(ReportScope::AllPeriods);
    }
    raw.parse::<PeriodKey>()
        .map(ReportScope::SpecificPeriod)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}
