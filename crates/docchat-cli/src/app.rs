//! Wiring from configuration to a ready controller

use crate::controller::ChatController;
use docchat_core::BackendClient;
use docchat_core::config::Config;
use docchat_core::error::ChatResult;
use docchat_session::{LocalSessionStorage, MemorySessionStorage, SessionStorage, SessionStore};
use tracing::debug;

/// Controller over the selected session backend and the HTTP backend
pub type CliController = ChatController<Box<dyn SessionStorage>, BackendClient>;

/// Pick the session backend: in-memory for ephemeral runs, else the local file
fn session_storage(config: &Config, ephemeral: bool) -> ChatResult<Box<dyn SessionStorage>> {
    if ephemeral {
        return Ok(Box::new(MemorySessionStorage::new()));
    }

    let storage = match &config.storage.directory {
        Some(dir) => LocalSessionStorage::with_path(dir.clone()),
        None => LocalSessionStorage::new()?,
    };
    Ok(Box::new(storage))
}

/// Open the session store, build the backend client and select the session
///
/// With `session` set that session becomes active, created if missing.
/// Ephemeral runs keep sessions in memory and never touch the session file.
pub async fn open_controller(
    config: &Config,
    session: Option<&str>,
    ephemeral: bool,
) -> ChatResult<CliController> {
    let mut store = SessionStore::open(session_storage(config, ephemeral)?).await?;
    if let Some(id) = session {
        store.switch_session(id).await?;
    }

    let backend = BackendClient::new(&config.backend)?;
    debug!(
        "Using backend at {} with sessions in {}",
        backend.base_url(),
        store.storage().location()
    );

    Ok(ChatController::new(store, backend, &config.backend))
}
