mod identity_store;
mod snapshot;
mod store_error;

pub use identity_store::{open_identity_store, IdentityStore};
pub use snapshot::{load_snapshot, remove_snapshot, save_snapshot};
pub use store_error::PersistenceError;
