use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Fixed backend database file name.
pub const DEFAULT_USERS_DB: &str = "users.db";

/// Pre-hashed bcrypt password for the seed admin account.
const ADMIN_PASSWORD_HASH: &str =
    "$2b$10$cNEPvsPkiIiwzSqw1A.qEutpmYK..DtbImPv.xz/VOMzMNMN/xf3a";

/// Schema mirrors the backend's user record; `allUIDs` is stored as JSON
/// text, the way the Node backend persists it.
const USERS_SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS users (
    userUID INTEGER PRIMARY KEY,
    username TEXT NOT NULL,
    userEmail TEXT NOT NULL,
    userTier TEXT NOT NULL,
    userLanguage TEXT NOT NULL,
    searchCount INTEGER NOT NULL DEFAULT 0,
    viewCount INTEGER NOT NULL DEFAULT 0,
    allUIDs TEXT NOT NULL,
    userPassword TEXT NOT NULL
);";

#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("Database operation failed")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to encode allUIDs for user '{username}'")]
    EncodeUids {
        username: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One seed row for the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub user_uid: i64,
    pub username: String,
    pub user_email: String,
    pub user_tier: String,
    pub user_language: String,
    pub search_count: i64,
    pub view_count: i64,
    pub all_uids: Vec<i64>,
    pub user_password: String,
}

/// The single admin account every reset restores.
pub fn default_admin() -> SeedUser {
    SeedUser {
        user_uid: 1,
        username: "admin".to_string(),
        user_email: "LegionCinemaAdmin@gmail.com".to_string(),
        user_tier: "Free".to_string(),
        user_language: "en".to_string(),
        search_count: 0,
        view_count: 0,
        all_uids: vec![1],
        user_password: ADMIN_PASSWORD_HASH.to_string(),
    }
}

/// Wipe the users table and insert the given seed rows in one transaction.
///
/// The table is created when missing so a fresh checkout can be seeded in a
/// single step. Returns the number of rows inserted.
pub fn reset_users(conn: &mut Connection, seeds: &[SeedUser]) -> Result<usize, AccountsError> {
    conn.execute_batch(USERS_SCHEMA)?;

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM users", [])?;

    for user in seeds {
        let all_uids =
            serde_json::to_string(&user.all_uids).map_err(|source| AccountsError::EncodeUids {
                username: user.username.clone(),
                source,
            })?;

        tx.execute(
            "INSERT INTO users (
                userUID, username, userEmail, userTier, userLanguage,
                searchCount, viewCount, allUIDs, userPassword
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                user.user_uid,
                user.username,
                user.user_email,
                user.user_tier,
                user.user_language,
                user.search_count,
                user.view_count,
                all_uids,
                user.user_password,
            ],
        )?;
    }
    tx.commit()?;

    info!(rows = seeds.len(), "reset users table");
    Ok(seeds.len())
}

/// Open (or create) the database at `path` and reset it.
pub fn reset_users_db(path: &Path, seeds: &[SeedUser]) -> Result<usize, AccountsError> {
    let mut conn = Connection::open(path)?;
    reset_users(&mut conn, seeds)
}
