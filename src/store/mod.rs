//! Persistence layer — durable key/value backends for the draft slot.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::DraftStore;
