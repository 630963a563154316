// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{admin, utils};

// Re-export commonly used types
pub use modules::admin::config::StoreConfig;
pub use modules::admin::error::AdminError;
pub use modules::admin::record::{AdminProfile, AdminRecord, NewAdmin};
pub use modules::admin::storage::{AdminStorage, InMemoryStorage, JsonFileStorage};
pub use modules::admin::store::AdminStore;

// Constants
pub const ADMINS_FILE: &str = "data/admins.json";
pub const DEFAULT_HASH_COST: u32 = 10;
