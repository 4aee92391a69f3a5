pub mod init;
pub mod phase;
pub mod schedule;
pub mod task;
pub mod timeline;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage phases")]
    Phase(phase::PhaseArgs),
    #[command(about = "Show the computed schedule and critical path")]
    Schedule(schedule::ScheduleArgs),
    #[command(about = "Show the milestone timeline")]
    Timeline(timeline::TimelineArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Phase(args) => phase::cmd(args),
            Commands::Schedule(args) => schedule::cmd(args),
            Commands::Timeline(args) => timeline::cmd(args),
        }
    }
}
