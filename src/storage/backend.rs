//! # Record Store Trait

use super::collection::{Collection, Record};
use super::errors::StorageResult;

/// Whole-collection persistence for one record type.
///
/// `load` materialises the full collection; `save` replaces it. There is no
/// locking across a load/save pair: concurrent writers race and the last
/// save wins.
pub trait RecordStore<T: Record>: Send + Sync + std::fmt::Debug {
    /// Read the full collection
    fn load(&self) -> StorageResult<Collection<T>>;

    /// Overwrite the stored collection
    fn save(&self, collection: &Collection<T>) -> StorageResult<()>;
}
