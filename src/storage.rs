pub mod board;
pub(crate) mod record;
pub mod store;

pub use board::{Board, LookupError};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreError};
