//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::auth_methods::AuthMethodsArgs;
use crate::commands::backups::BackupsCommand;
use crate::commands::files::FilesCommand;
use crate::commands::login::LoginArgs;
use crate::commands::logout::LogoutArgs;
use crate::commands::records::RecordsCommand;
use crate::commands::whoami::WhoamiArgs;

/// Server used when neither `--url` nor a stored session names one.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8090";

/// PocketBase CLI tool for server exploration.
#[derive(Parser, Debug)]
#[command(name = "pb")]
#[command(author, version = env!("PB_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect and how to authenticate.
#[derive(Args, Debug, Clone, Default)]
pub struct ServerArgs {
    /// Server base URL [default: stored session, then http://127.0.0.1:8090]
    #[arg(long, env = "PB_URL", global = true)]
    pub url: Option<String>,

    /// Admin email used to log in
    #[arg(long, env = "PB_ADMIN_EMAIL", global = true)]
    pub admin_email: Option<String>,

    /// Admin password used to log in
    #[arg(long, env = "PB_ADMIN_PASSWORD", global = true, hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Bearer token to use instead of logging in
    #[arg(long, env = "PB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in as an admin and store the session
    Login(LoginArgs),

    /// Remove the stored session
    Logout(LogoutArgs),

    /// Display the stored session
    Whoami(WhoamiArgs),

    /// Record operations on a collection
    Records(RecordsCommand),

    /// List the auth methods of an auth collection
    AuthMethods(AuthMethodsArgs),

    /// Backup management (admin only)
    Backups(BackupsCommand),

    /// Protected file access
    Files(FilesCommand),
}
