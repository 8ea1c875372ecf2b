mod import;
mod merge;
mod reset_users;

pub use import::ImportLibraryCommand;
pub use merge::MergeCommand;
pub use reset_users::ResetUsersCommand;
