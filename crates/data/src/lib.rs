// crates/data/src/lib.rs
// Pre-generated dataset caches loaded into memory at startup
pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::DataStore;
