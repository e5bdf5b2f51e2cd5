use std::sync::Once;

mod atomic;
pub mod config;
pub mod errors;
pub mod factory;
pub mod lookup;
pub mod platform;
pub mod profile;
pub mod recent;
pub mod report;
pub mod storage;
pub mod vault;

pub use config::Config;
pub use errors::{Result, VaultError};
pub use factory::ProfileFactory;
pub use lookup::{GitHubClient, GitHubUser, ProfileLookup};
pub use platform::Platform;
pub use profile::{InputType, Metric, ProfileRecord, RecordKey, SearchQuery};
pub use recent::RecentSearches;
pub use storage::{AtomicFileStore, KeyValueStore, MemoryStore};
pub use vault::{ProfileVault, SaveOutcome};

// Store keys, kept identical to the mobile app's storage layout
pub const SAVED_PROFILES_KEY: &str = "@saved_profiles";
pub const RECENT_SEARCHES_KEY: &str = "@recent_searches";

pub static INIT: Once = Once::new();

/// Set up logging once per process. Safe to call from every test.
pub fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
        log::info!("Initializing profile vault");
    });
}
