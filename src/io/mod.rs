pub mod config_io;
pub mod memory_store;
pub mod sqlite_store;
pub mod store;
pub mod transfer;
