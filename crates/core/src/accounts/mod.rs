//! User-accounts reset: wipe the users table back to a single seed admin.

mod seed;

pub use seed::{
    default_admin, reset_users, reset_users_db, AccountsError, SeedUser, DEFAULT_USERS_DB,
};
