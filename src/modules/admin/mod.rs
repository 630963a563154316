pub mod config;
pub mod error;
mod ids;
pub mod password;
pub mod record;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use error::AdminError;
pub use ids::IdGenerator;
pub use password::{hash_password, verify_password};
pub use record::{AdminProfile, AdminRecord, NewAdmin};
pub use storage::{AdminStorage, InMemoryStorage, JsonFileStorage};
pub use store::AdminStore;
