//! # Planr - project plan tracking from the terminal
//!
//! A command-line utility for tracking project tasks, their dependencies,
//! and the resulting schedule.
//!
//! ## Features
//!
//! - **Task Management**: Create, update and track tasks with start dates,
//!   durations, phases and parent/child hierarchy
//! - **Dependency Scheduling**: Single-predecessor dependencies with two
//!   explicit enforcement policies (reject or auto-advance)
//! - **Critical Path**: Longest dependency chain computation with cycle
//!   detection
//! - **Schedule View**: Flattened Gantt-style table with computed finish
//!   dates and critical-path markers
//! - **Timeline**: Dated milestones and active tasks at a glance
//! - **Legacy Data**: One-time migration of name-based task references to
//!   stable ids
//!
//! ## Usage
//!
//! ```rust,no_run
//! use planr::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
