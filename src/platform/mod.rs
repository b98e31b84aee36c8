//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Visibility/orientation detection
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;
pub mod time;
pub mod visibility;

pub use input::JumpKeys;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::FrameClock;
pub use visibility::SuspendGate;
