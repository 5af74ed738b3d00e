use std::{env, path::PathBuf};

use ledger_config::{Config, ConfigManager};
use ledger_core::{reporting_offset, CoreError, LedgerSession, RefreshOutcome, SessionSettings};
use ledger_domain::Identity;
use ledger_storage_json::JsonSalesStore;
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::cli::commands;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::render;
use crate::cli::system_clock::SystemClock;
use crate::errors::{CliError, CommandError};

/// Overrides the directory holding `config/` (and `data/` unless configured).
pub const HOME_ENV: &str = "SALES_LEDGER_HOME";
const DEFAULT_HOME_DIR: &str = ".sales_ledger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: JsonSalesStore,
    pub session: Option<LedgerSession<SystemClock>>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = env::var_os(HOME_ENV).map(PathBuf::from);
        let base = home.clone().unwrap_or_else(default_home);
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;

        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script || !config.ui_color_enabled,
        });

        let data_root = match (&config.data_root, home) {
            (Some(path), _) => path.clone(),
            (None, Some(home)) => home.join("data"),
            (None, None) => config.resolve_data_root(),
        };
        let store = JsonSalesStore::new(data_root.join("sales"))?;
        debug!(sales_dir = %store.sales_dir().display(), "sales store ready");

        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }
        for (alias, target) in commands::aliases() {
            registry.alias(alias, target);
        }

        let mut context = Self {
            mode,
            registry,
            config_manager,
            config,
            store,
            session: None,
            running: true,
        };
        context.restore_identity();
        Ok(context)
    }

    /// Reopens the identity saved by a previous run and loads its ledger.
    fn restore_identity(&mut self) {
        let Some(identity) = self.config.identity.clone().and_then(Identity::new) else {
            return;
        };
        self.open_session(identity);
        if let Err(err) = self.refresh_session() {
            warn!(error = %err, "initial refresh failed");
            self.print_warning(&format!("Could not load sales: {err}"));
        }
    }

    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            offset: reporting_offset(self.config.effective_offset_minutes()),
            page_window: self.config.effective_page_window(),
        }
    }

    /// Points the session at `identity`, creating it on first use.
    pub fn open_session(&mut self, identity: Identity) {
        if let Some(session) = self.session.as_mut() {
            session.set_identity(identity);
            return;
        }
        let settings = self.settings();
        self.session = Some(LedgerSession::new(identity, SystemClock, settings));
    }

    pub fn session(&self) -> Result<&LedgerSession<SystemClock>, CommandError> {
        self.session.as_ref().ok_or(CommandError::IdentityMissing)
    }

    pub fn session_mut(&mut self) -> Result<&mut LedgerSession<SystemClock>, CommandError> {
        self.session.as_mut().ok_or(CommandError::IdentityMissing)
    }

    pub fn refresh_session(&mut self) -> Result<RefreshOutcome, CommandError> {
        let session = self.session.as_mut().ok_or(CommandError::IdentityMissing)?;
        Ok(session.refresh(&self.store)?)
    }

    pub fn format_amount(&self, amount: f64) -> String {
        render::format_amount(&self.config.currency_symbol, amount)
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match &self.session {
            Some(session) => format!("sales[{}]> ", session.identity()),
            None => "sales> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        self.print_warning(&format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                self.print_hint(&format!("Did you mean `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
            }
            CommandError::IdentityMissing => {
                self.print_error(&CommandError::IdentityMissing.to_string());
                self.print_hint("Try `identity shop@example.com` to get started.");
            }
            CommandError::Core(CoreError::Validation(message)) => {
                self.print_error(&message);
            }
            other => self.print_error(&other.to_string()),
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        output::hint(message);
    }
}

fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR)
}
