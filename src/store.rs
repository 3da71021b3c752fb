pub mod blob;
pub use blob::{BlobStore, JsonCollection};
pub mod lead_store;
pub use lead_store::LeadStore;
pub mod project_store;
pub use project_store::ProjectStore;
pub mod transaction_store;
pub use transaction_store::TransactionStore;
