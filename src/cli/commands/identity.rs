use ledger_core::RefreshOutcome;
use ledger_domain::Identity;
use tracing::info;

use crate::cli::commands::usage_error;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::errors::CommandResult;

const IDENTITY_USAGE: &str = "identity [email]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "identity",
            "Show or switch the identity whose sales are loaded",
            IDENTITY_USAGE,
            cmd_identity,
        ),
        CommandEntry::new(
            "refresh",
            "Reload sales for the current identity",
            "refresh",
            cmd_refresh,
        ),
    ]
}

fn cmd_identity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        let session = context.session()?;
        output::info(format!("Current identity: {}", session.identity()));
        return Ok(());
    };
    if args.len() > 1 {
        return Err(usage_error(IDENTITY_USAGE));
    }
    let identity = Identity::new(*raw).ok_or_else(|| usage_error(IDENTITY_USAGE))?;

    context.config.identity = Some(identity.as_str().to_string());
    context.config_manager.save(&context.config)?;
    info!(%identity, "identity switched");

    context.open_session(identity.clone());
    output::success(format!("Identity set to {identity}."));
    refresh_and_report(context)
}

fn cmd_refresh(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    refresh_and_report(context)
}

/// Refreshes the session and tells the user what changed.
pub(crate) fn refresh_and_report(context: &mut ShellContext) -> CommandResult {
    match context.refresh_session()? {
        RefreshOutcome::Applied { periods, sales } => {
            let session = context.session()?;
            output::info(format!(
                "Loaded {sales} sale(s) across {periods} month(s). Showing {}.",
                session.current_label()
            ));
        }
        RefreshOutcome::Stale { ticket, latest } => {
            output::warning(format!(
                "Ignored results of fetch {ticket}; fetch {latest} is newer."
            ));
        }
    }
    Ok(())
}
