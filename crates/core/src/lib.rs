pub mod accounts;
pub mod config;
pub mod io;
pub mod library;
pub mod reconcile;

pub use accounts::{default_admin, reset_users, reset_users_db, AccountsError, SeedUser};
pub use config::ReconcileConfig;
pub use io::{load_csv, require_columns, write_csv, TableIoError};
pub use library::{import_library, ImportSummary, LibraryError, LibrarySheet};
pub use reconcile::{ReconcileError, ReconcileReport, ReconcileWarning, Reconciler};
