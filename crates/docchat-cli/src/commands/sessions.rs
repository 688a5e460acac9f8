//! Session management commands

use crate::console::CliConsole;
use crate::controller::ChatController;
use colored::*;
use docchat_core::ChatBackend;
use docchat_core::error::ChatResult;
use docchat_session::{SessionStorage, SessionStore};

/// One line per session: marker, id, preview
pub fn session_lines<S: SessionStorage>(store: &SessionStore<S>) -> Vec<String> {
    store
        .sessions()
        .iter()
        .map(|(id, session)| {
            let marker = if id == store.active_id() { "*" } else { " " };
            let files = session.uploaded_files().len();
            format!("{marker} {id}  {}  ({files} file(s))", session.preview())
        })
        .collect()
}

/// List sessions, marking the active one
pub fn list<S: SessionStorage, B: ChatBackend>(
    ctl: &ChatController<S, B>,
    console: &CliConsole,
) {
    console.print_header("Sessions");
    for line in session_lines(ctl.store()) {
        if line.starts_with('*') {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
}

/// Create a new session and make it active
pub async fn create<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &CliConsole,
) -> ChatResult<()> {
    let id = ctl.store_mut().create_session().await?;
    console.success(&format!("Created session {id}"));
    Ok(())
}

/// Make a session active, creating it if needed
pub async fn switch<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &CliConsole,
    id: &str,
) -> ChatResult<()> {
    let existed = ctl.store().contains(id);
    ctl.store_mut().switch_session(id).await?;
    if existed {
        console.success(&format!("Switched to session {id}"));
    } else {
        console.success(&format!("Created and switched to session {id}"));
    }
    Ok(())
}

/// Delete a session after confirmation
pub async fn delete<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &CliConsole,
    id: &str,
    skip_confirm: bool,
) -> ChatResult<()> {
    if !ctl.store().contains(id) {
        console.warn(&format!("No session named {id}"));
        return Ok(());
    }

    if !skip_confirm {
        let prompt = format!("Delete history for session {id}? This cannot be undone.");
        if !console.confirm(&prompt)? {
            console.info("Cancelled");
            return Ok(());
        }
    }

    ctl.store_mut().delete_session(id).await?;
    console.success(&format!("Deleted session {id}"));
    console.detail(&format!("Active session: {}", ctl.store().active_id()));
    Ok(())
}
