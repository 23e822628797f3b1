pub mod filter_store;
pub mod history;
pub mod session;

pub use filter_store::{DirectoryFilterStore, FilterStore, InMemoryFilterStore};
pub use history::{History, Snapshot};
pub use session::EditSession;
