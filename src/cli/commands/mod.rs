//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod search;
pub mod show;
pub mod skills;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::Skills(args) => skills::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank agents and skills against a keyword query
    Search(search::SearchArgs),

    /// Count detected skill labels across the collection
    Skills(skills::SkillsArgs),

    /// Show one agent or skill
    Show(show::ShowArgs),
}
