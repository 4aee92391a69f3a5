use crate::{
    db::phases::{Phase, Phases},
    libs::{messages::Message, view::View},
    msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct PhaseArgs {
    #[command(subcommand)]
    command: PhaseCommand,
}

#[derive(Debug, Subcommand)]
enum PhaseCommand {
    /// Create a new phase
    Create {
        /// Phase name
        name: String,
    },
    /// List all phases
    List,
    /// Delete a phase
    Delete {
        /// Phase name or id to delete
        phase: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: PhaseArgs) -> Result<()> {
    match args.command {
        PhaseCommand::Create { name } => handle_create(name),
        PhaseCommand::List => handle_list(),
        PhaseCommand::Delete { phase, yes } => handle_delete(phase, yes),
    }
}

fn handle_create(name: String) -> Result<()> {
    let mut phases_db = Phases::new()?;

    if phases_db.get_by_name(&name)?.is_some() {
        return Err(msg_error_anyhow!(Message::PhaseAlreadyExists(name)));
    }

    let phase = Phase::new(name.clone());
    phases_db.create(&phase)?;

    msg_success!(Message::PhaseCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let mut phases_db = Phases::new()?;
    let phases = phases_db.list()?;

    if phases.is_empty() {
        msg_info!(Message::NoPhasesFound);
        return Ok(());
    }

    msg_print!(Message::PhaseListHeader, true);
    View::phases(&phases)?;
    Ok(())
}

fn handle_delete(ident: String, yes: bool) -> Result<()> {
    let mut phases_db = Phases::new()?;

    let phase = if let Ok(id) = ident.parse::<i64>() {
        phases_db.get_by_id(id)?
    } else {
        phases_db.get_by_name(&ident)?
    };
    let phase = match phase {
        Some(p) => p,
        None => return Err(msg_error_anyhow!(Message::PhaseNotFound(ident))),
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeletePhase(phase.name.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::DeleteCancelled);
        return Ok(());
    }

    phases_db.delete(phase.id.unwrap())?;
    msg_success!(Message::PhaseDeleted(phase.name));
    Ok(())
}
