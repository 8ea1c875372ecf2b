mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ImportLibraryCommand, MergeCommand, ResetUsersCommand};

/// AITUCAP data toolkit - one-shot catalog wrangling utilities
#[derive(Debug, Parser)]
#[command(
    name = "aitucap",
    version,
    about = "One-shot data utilities for the AITUCAP movie catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge the IMDb top-10k catalog with the TMDB dump
    Merge(MergeCommand),
    /// Convert the Kazakh movie spreadsheet into its own SQLite database
    ImportLibrary(ImportLibraryCommand),
    /// Reset the user-accounts table to the single seed admin
    ResetUsers(ResetUsersCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Merge(cmd) => cmd.execute()?,
        Commands::ImportLibrary(cmd) => cmd.execute()?,
        Commands::ResetUsers(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}
