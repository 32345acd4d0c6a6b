use clap::{Parser, Subcommand, ValueEnum};

use crate::store::View;

pub const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "tudoo",
    version = VERSION,
    about = "Personal task tracker: todo, in-progress, done",
    after_help = "\
NOTE:
  Data lives in $TUDOO_HOME (default ~/.tudoo). Run `tudoo init` before any other command,
  then `tudoo signup` and `tudoo login`.

EXIT CODES:
  0  Success
  1  Error (not initialized, not authenticated, validation, storage, etc.)

STATUS TOGGLE:
  `task toggle` advances one step: todo → in-progress → done → todo.

LOGGING:
  Set TUDOO_LOG (e.g. `debug`, `tudoo=info`) to change diagnostics on stderr. Default: error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Create an account
    Signup {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out of the current session
    Logout,

    /// Show tasks grouped into To Do / In Progress / Done
    Dashboard,

    /// Show completed tasks, most recently updated first
    Completed,

    /// Show account and version information
    Settings,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Interactive session on one page, reading commands from stdin
    #[command(after_help = "\
COMMANDS:
  list                          Render the page
  add <title> [| <description>] Create a task
  edit <id> <title> [| <desc>]  Change title and description
  toggle <id>                   Advance status one step
  delete <id>                   Delete a task
  reload                        Re-fetch from storage
  help                          Show this list
  quit                          Leave the session

  Ids may be unique prefixes.")]
    Shell {
        #[arg(long, value_enum, default_value_t = ViewArg::Dashboard)]
        view: ViewArg,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task (status todo)
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a task's title or description
    Edit {
        /// Task ID or prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// New description; an empty value clears it
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum, default_value_t = ViewArg::Dashboard)]
        view: ViewArg,
    },
    /// Advance a task's status (todo → in-progress → done → todo)
    Toggle {
        id: String,
        #[arg(long, value_enum, default_value_t = ViewArg::Dashboard)]
        view: ViewArg,
    },
    /// Delete a task
    Delete {
        id: String,
        #[arg(long, value_enum, default_value_t = ViewArg::Dashboard)]
        view: ViewArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Dashboard,
    Completed,
}

impl From<ViewArg> for View {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Dashboard => View::Dashboard,
            ViewArg::Completed => View::Completed,
        }
    }
}
