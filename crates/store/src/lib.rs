//! Task and upload stores.
//!
//! Both stores are defined as async traits so the in-memory
//! implementations (process-lifetime state, per the durability
//! non-goal) can be swapped for a persistent backend without touching
//! the orchestration logic.

pub mod task;
pub mod upload;

pub use task::{MemoryTaskStore, TaskStore};
pub use upload::{MemoryUploadStore, UploadStore};
