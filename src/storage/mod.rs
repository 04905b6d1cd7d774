//! Record storage
//!
//! A collection is always read and written whole. The file store treats a
//! single JSON document as the database; the memory store keeps the same
//! semantics without touching disk.
//!
//! There is no locking across a load/save cycle. Two concurrent writers
//! race and the last save silently wins.

mod backend;
mod collection;
mod errors;
mod file;
mod memory;

pub use backend::RecordStore;
pub use collection::{Collection, Layout, Record};
pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
