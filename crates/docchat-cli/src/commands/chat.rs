//! Chat commands

use crate::console::CliConsole;
use crate::controller::ChatController;
use docchat_core::ChatBackend;
use docchat_core::error::ChatResult;
use docchat_session::SessionStorage;

/// Send a message and print the answer
pub async fn send<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &mut CliConsole,
    message: &str,
) -> ChatResult<()> {
    console.start_progress("Thinking...");
    let result = ctl.send(message).await;
    console.finish_progress();
    let outcome = result?;

    if !outcome.applied.is_applied() {
        console.warn("The session was deleted before the reply arrived");
        return Ok(());
    }

    match outcome.answer {
        Some(answer) => println!("{answer}"),
        None => history(ctl, console),
    }
    Ok(())
}

/// Print the transcript of the active session
pub fn history<S: SessionStorage, B: ChatBackend>(
    ctl: &ChatController<S, B>,
    console: &CliConsole,
) {
    let text = ctl
        .store()
        .active_session()
        .map(|s| s.chat_history())
        .unwrap_or_default();
    console.print_transcript(text);
}

/// Clear the transcript on the backend, then locally
pub async fn clear<S: SessionStorage, B: ChatBackend>(
    ctl: &mut ChatController<S, B>,
    console: &mut CliConsole,
) -> ChatResult<()> {
    console.start_progress("Clearing history...");
    let result = ctl.clear_history().await;
    console.finish_progress();

    console.success(&result?);
    Ok(())
}
