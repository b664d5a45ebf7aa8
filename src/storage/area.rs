use crate::errors::StorageError;

/// Object-safe key/value storage area (DOM's Storage).
pub trait StorageArea: Send + Sync {
    /// Retrieves the value associated with the given key, or `None` if not found.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Sets the value for the given key, overwriting any existing value.
    ///
    /// Returns the value as it now reads back from the area.
    fn set_item(&self, key: &str, value: &str) -> Result<Option<String>, StorageError>;

    /// Removes the item with the given key, returning the value it had.
    fn remove_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Clears all items in the storage area.
    fn clear(&self) -> Result<(), StorageError>;

    /// Returns the number of items in the storage area.
    fn len(&self) -> Result<usize, StorageError>;

    /// Returns all keys in the storage area, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}
