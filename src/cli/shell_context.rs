use crate::{
    config::{Config, ConfigManager},
    core::{LedgerStore, Session},
    errors::CliError,
    storage::{JsonFileStore, LedgerPersistence},
};

use super::{commands, output, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can touch.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads config from the data directory and opens the saved ledger.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store_file = config.resolve_store_file(config_manager.base_dir());
        tracing::info!(path = %store_file.display(), "opening ledger store");

        let persistence = LedgerPersistence::new(Box::new(JsonFileStore::new(store_file)?))
            .with_key(config.storage_key.clone())
            .with_retention_days(config.retention_days);
        let session = Session::new(LedgerStore::open(persistence));
        Ok(Self::with_session(mode, session, config))
    }

    pub fn with_session(mode: CliMode, session: Session, config: Config) -> Self {
        output::set_color_enabled(config.color_output && mode == CliMode::Interactive);
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            session,
            config,
            last_command: None,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("ledger [{}]> ", self.session.filter())
    }
}
