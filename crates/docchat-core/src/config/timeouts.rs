//! Default timeout values for backend calls
//!
//! Ingest can take a while on large documents (the backend chunks and embeds
//! them synchronously), so the request timeout is generous.

/// Default connection timeout (10 seconds)
pub const CONNECTION_SECS: u64 = 10;

/// Default request timeout (2 minutes)
pub const REQUEST_SECS: u64 = 120;
