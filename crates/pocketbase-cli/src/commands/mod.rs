//! Subcommand implementations.

pub mod auth_methods;
pub mod backups;
pub mod files;
pub mod login;
pub mod logout;
pub mod records;
pub mod whoami;
