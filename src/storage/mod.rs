mod file_storage;

pub use file_storage::{Collection, FileStorage, Result, StorageError};
