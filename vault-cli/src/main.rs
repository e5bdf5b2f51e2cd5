use clap::Parser;

use profile_vault::{
    AtomicFileStore, Config, GitHubClient, ProfileFactory, ProfileVault,
    RecentSearches,
};

mod cli;
mod commands;
mod error;

use crate::cli::Cli;
pub use crate::error::AppError;

/// Everything a command needs, built once from the configuration.
pub struct Context {
    pub config: Config,
    pub vault: ProfileVault<AtomicFileStore>,
    pub recent: RecentSearches<AtomicFileStore>,
}

impl Context {
    pub fn open(config: Config) -> Result<Self, AppError> {
        let store = AtomicFileStore::new(&config.data_dir).map_err(|e| {
            AppError::StorageOpenError(
                config.data_dir.display().to_string(),
                e.to_string(),
            )
        })?;
        Ok(Self {
            vault: ProfileVault::new(store.clone()),
            recent: RecentSearches::with_capacity(
                store,
                config.recent_capacity,
            ),
            config,
        })
    }

    pub fn factory(&self) -> Result<ProfileFactory<GitHubClient>, AppError> {
        let client = GitHubClient::new(&self.config.lookup)?;
        Ok(ProfileFactory::new(client, self.config.lookup_timeout()))
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Cli::parse();

    let result = match Config::load() {
        Ok(config) => match Context::open(config) {
            Ok(ctx) => args.command.run(&ctx).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(AppError::ConfigError(e.to_string())),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
