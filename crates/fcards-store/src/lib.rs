// SQLite-backed question store
// Owns the schema, migrations and the sample deck

pub mod error;
pub mod migrate;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use store::Store;
