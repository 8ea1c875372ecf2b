use std::path::PathBuf;

use aitucap_core::accounts::{default_admin, reset_users_db, DEFAULT_USERS_DB};
use anyhow::Result;
use clap::Parser;

/// Reset the user-accounts table to the single seed admin
#[derive(Debug, Parser)]
pub struct ResetUsersCommand {
    /// Users database file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_USERS_DB)]
    pub db: PathBuf,
}

impl ResetUsersCommand {
    pub fn execute(&self) -> Result<i32> {
        let seeds = [default_admin()];
        let inserted = reset_users_db(&self.db, &seeds)?;

        println!(
            "Success! Data wiped and reset in '{}' ({} seed row)",
            self.db.display(),
            inserted
        );
        Ok(0)
    }
}
