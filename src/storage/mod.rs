//! Persistence layer: pluggable file adapters and the JSON storage service

pub mod adapter;
pub mod fs;
pub mod memory;
pub mod service;

pub use adapter::FileSystemAdapter;
pub use fs::FsAdapter;
pub use memory::InMemoryAdapter;
pub use service::StorageService;
