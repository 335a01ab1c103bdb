//! Durable client storage implementations.

pub mod atomic_toml;
pub mod file_client_storage;
pub mod memory_client_storage;

pub use atomic_toml::AtomicTomlFile;
pub use file_client_storage::FileClientStorage;
pub use memory_client_storage::MemoryClientStorage;
