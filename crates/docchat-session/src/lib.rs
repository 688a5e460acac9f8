//! Session management and persistence for DocChat
//!
//! This crate provides:
//! - The session data model (transcript plus attached files)
//! - An insertion-ordered session map with a stable JSON layout
//! - `SessionStore`, the write-through store with an active session
//! - Storage backends (local JSON file, in-memory)

pub mod map;
pub mod session;
pub mod storage;
pub mod store;

pub use map::SessionMap;
pub use session::{Session, UploadedFile, generate_session_id};
pub use storage::{
    LocalSessionStorage, MemorySessionStorage, SESSIONS_FILE_NAME, SessionStorage, StorageError,
    StorageResult,
};
pub use store::{ApplyOutcome, RequestToken, SessionStore};
