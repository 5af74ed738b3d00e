pub mod browse;
pub mod identity;
pub mod report;
pub mod sales;
pub mod system;

use crate::cli::registry::CommandEntry;
use crate::errors::CommandError;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(identity::definitions());
    commands.extend(browse::definitions());
    commands.extend(report::definitions());
    commands.extend(sales::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn aliases() -> Vec<(&'static str, &'static str)> {
    vec![("previous", "prev"), ("quit", "exit")]
}

pub(crate) fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, CommandError> {
    raw.trim().parse::<T>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid {what} `{raw}`"))
    })
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}
