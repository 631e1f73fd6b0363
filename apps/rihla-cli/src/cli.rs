//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rihla_core::auth::ControlMode;

#[derive(Parser, Debug)]
#[command(name = "rihla", version, about = "Rihla dashboard client")]
pub struct Cli {
    /// Where the token and cookie jar are kept. `redis` reads `REDIS_URL`.
    #[arg(
        long,
        env = "RIHLA_STORAGE",
        value_enum,
        default_value_t = StorageBackend::File,
        global = true
    )]
    pub storage: StorageBackend,

    /// Directory holding the client storage and cookie jar.
    #[arg(long, env = "RIHLA_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Identity API base URL.
    #[arg(
        long,
        env = "IDENTITY_API_URL",
        default_value = "http://localhost:8000/api",
        global = true
    )]
    pub identity_url: String,

    /// Per-request timeout for identity and portal calls, in seconds.
    #[arg(long, env = "IDENTITY_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Portal base URL, re-requested after a cookie repair.
    #[arg(
        long,
        env = "PORTAL_URL",
        default_value = "http://127.0.0.1:8080",
        global = true
    )]
    pub portal_url: String,

    /// Login page used for redirects.
    #[arg(long, env = "LOGIN_PATH", default_value = "/auth/login", global = true)]
    pub login_path: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a bearer token and load the session it belongs to.
    Login {
        token: String,
    },
    /// Forget the stored token and expire the cookie.
    Logout,
    /// Show the signed-in user.
    Whoami {
        /// Print the user record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a guard against the current session.
    Check {
        /// Required role (repeatable).
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Required permission (repeatable).
        #[arg(long = "permission")]
        permissions: Vec<String>,
        /// Require every listed role and permission instead of any one.
        #[arg(long)]
        all: bool,
        /// Evaluate as a full-page guard for this path.
        #[arg(long)]
        path: Option<String>,
        /// How a denied control is presented.
        #[arg(long, value_enum, default_value_t = Presentation::Hide)]
        mode: Presentation,
    },
    /// Restore a missing auth cookie from storage and refresh the portal.
    Reconcile,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Redis,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    Hide,
    Disable,
}

impl From<Presentation> for ControlMode {
    fn from(p: Presentation) -> Self {
        match p {
            Presentation::Hide => ControlMode::Hide,
            Presentation::Disable => ControlMode::Disable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "rihla",
            "check",
            "--permission",
            "can_view_place",
            "--permission",
            "can_edit_place",
            "--all",
            "--mode",
            "disable",
        ])
        .unwrap();

        match cli.command {
            Commands::Check {
                permissions,
                all,
                mode,
                path,
                ..
            } => {
                assert_eq!(permissions, vec!["can_view_place", "can_edit_place"]);
                assert!(all);
                assert_eq!(mode, Presentation::Disable);
                assert!(path.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_data_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["rihla", "whoami", "--data-dir", "/tmp/rihla", "--json"])
            .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/rihla")));
        assert!(matches!(cli.command, Commands::Whoami { json: true }));
    }

    #[test]
    fn test_parse_storage_backend() {
        let cli = Cli::try_parse_from(["rihla", "--storage", "redis", "logout"]).unwrap();
        assert_eq!(cli.storage, StorageBackend::Redis);

        assert!(Cli::try_parse_from(["rihla", "--storage", "sqlite", "logout"]).is_err());
    }

    #[test]
    fn test_login_requires_token() {
        assert!(Cli::try_parse_from(["rihla", "login"]).is_err());
    }
}
