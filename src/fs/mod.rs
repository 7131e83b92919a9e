pub mod checkpoint;
pub mod locking;
pub mod log;
pub mod store;

pub use locking::{LockMode, StoreLock};
pub use log::{CsvLog, Positioned, RecordLog, Scan};
pub use store::{locate_store, Store, StoreLocation, STORE_DIR_ENV, STORE_DIR_NAME};
