//! Command routing logic for CLI

use crate::app::open_controller;
use crate::args::{Cli, Commands, ConfigAction};
use crate::commands::{self, chat, files, interactive, sessions};
use crate::console::CliConsole;
use docchat_core::config::Config;
use docchat_core::error::ChatResult;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: Config) -> ChatResult<()> {
    let mut console = CliConsole::new(cli.verbose);

    // Config commands never touch the session store
    if let Some(Commands::Config { action }) = &cli.command {
        return match action {
            ConfigAction::Show => commands::config::show(&console, &config, &cli.config_file),
            ConfigAction::Init { force } => {
                commands::config::init(&console, &cli.config_file, *force).await
            }
        };
    }

    let mut ctl = open_controller(&config, cli.session.as_deref(), cli.ephemeral).await?;

    let Some(command) = cli.command else {
        return interactive::run(&mut ctl, &mut console).await;
    };

    match command {
        Commands::Sessions => {
            sessions::list(&ctl, &console);
            Ok(())
        }
        Commands::New => sessions::create(&mut ctl, &console).await,
        Commands::Delete { id, yes } => sessions::delete(&mut ctl, &console, &id, yes).await,
        Commands::Upload { paths } => files::upload(&mut ctl, &mut console, &paths).await,
        Commands::Files => {
            files::list(&ctl, &console);
            Ok(())
        }
        Commands::Remove { index } => files::remove(&mut ctl, &console, index).await,
        Commands::RemoveAll => files::remove_all(&mut ctl, &console).await,
        Commands::Send { message } => chat::send(&mut ctl, &mut console, &message).await,
        Commands::History => {
            chat::history(&ctl, &console);
            Ok(())
        }
        Commands::Clear => chat::clear(&mut ctl, &mut console).await,
        // Routed before the store is opened
        Commands::Config { .. } => Ok(()),
    }
}
