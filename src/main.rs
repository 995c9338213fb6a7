mod api;
mod calc;
mod cmd;
mod data;
mod error;
mod ui;

use anyhow::anyhow;
use api::HttpBackend;
use calc::TaskFilter;
use chrono::{Datelike, Local};
use clap::{ArgAction, Parser, Subcommand};
use data::{ClientConfig, GoalInput, LocalStore, NoteInput, Priority, ProfileEdit, SettingsEdit, TaskInput};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perspectives", about = "tasks, goals, notes and a holiday calendar")]
struct Cli {
    /// Path to the data directory holding config.yaml and stored data (default: ./config)
    #[arg(long, default_value = "./config", global = true)]
    data_dir: PathBuf,

    /// Backend base URL, overriding api_base_url from config.yaml
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default data files
    Init,
    /// Create an account on the backend
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and store the access token
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout {
        /// Also clear the stored profile and settings
        #[arg(long)]
        all: bool,
    },
    /// Manage tasks on the backend
    #[command(subcommand)]
    Tasks(TaskCommands),
    /// Manage labels on the backend
    #[command(subcommand)]
    Labels(LabelCommands),
    /// Local notes
    #[command(subcommand)]
    Notes(NoteCommands),
    /// Local goals with progress tracking
    #[command(subcommand)]
    Goals(GoalCommands),
    /// Local checklists
    #[command(subcommand)]
    Checklists(ChecklistCommands),
    /// List assignees, optionally filtered by name
    Assignees { query: Option<String> },
    /// Show or edit the user profile
    #[command(subcommand)]
    Profile(ProfileCommands),
    /// Show or edit application settings
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// List holidays for a year
    Holidays {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Month calendar with holidays and tasks
    Calendar {
        /// Month to show, as YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// Print the month instead of opening the interactive view
        #[arg(long)]
        print: bool,
    },
    /// Print a random affirmation
    Affirmation,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// List tasks, optionally filtered
    List {
        /// Case-insensitive text in the title or description
        #[arg(long, default_value = "")]
        search: String,
        /// High, Medium or Low
        #[arg(long, default_value = "")]
        priority: String,
        /// Exact label name
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Create a task
    Add {
        title: String,
        #[arg(short, long)]
        priority: String,
        /// YYYY-MM-DD or an RFC 3339 datetime
        #[arg(short, long)]
        deadline: String,
        #[arg(long)]
        description: Option<String>,
        /// HH:MM
        #[arg(long)]
        start: Option<String>,
        /// HH:MM
        #[arg(long)]
        end: Option<String>,
        /// Assignee id; defaults to the first assignee
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Flip a task between complete and not complete
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// Assign a task by assignee id or name
    Assign { id: String, assignee: String },
    /// Replace a task's labels; no labels clears them
    Label { id: String, labels: Vec<String> },
}

#[derive(Subcommand)]
enum LabelCommands {
    List,
    Add { name: String },
}

#[derive(Subcommand)]
enum NoteCommands {
    List,
    Add {
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum GoalCommands {
    List,
    Add {
        title: String,
        /// Health, Finance, Career, Education or Personal
        #[arg(short, long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add 10% progress, or set it with --to
    Bump {
        id: String,
        #[arg(long)]
        to: Option<u32>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum ChecklistCommands {
    List,
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    AddItem { checklist_id: String, text: String },
    ToggleItem { checklist_id: String, item_id: String },
    DeleteItem { checklist_id: String, item_id: String },
    Delete { checklist_id: String },
}

#[derive(Subcommand)]
enum ProfileCommands {
    Show,
    Set {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    Show,
    Set {
        /// light or dark
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        email_notifications: Option<bool>,
        #[arg(long)]
        task_reminders: Option<bool>,
        #[arg(long)]
        compact_view: Option<bool>,
        #[arg(long)]
        sound: Option<bool>,
    },
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    // Resolve data_dir to an absolute path so later file I/O does not depend
    // on the working directory.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    let store = LocalStore::new(data_dir);
    let mut out = std::io::stdout();

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && store.needs_init() {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            store.dir().display()
        );
        cmd::init::run(&store, &mut std::io::stderr())?;
    }

    let config = store.load::<ClientConfig>().with_override(cli.api_url.as_deref());
    let backend = HttpBackend::new(&config.api_base_url)?;
    debug!(api = %backend.base_url(), dir = %store.dir().display(), "starting");
    let today = Local::now().date_naive();

    match cli.command {
        None => cmd::root::run(&store, &backend, None),
        Some(Commands::Init) => cmd::init::run(&store, &mut out),
        Some(Commands::Signup {
            username,
            email,
            password,
        }) => {
            let password = read_password(password)?;
            cmd::auth::signup(&backend, &username, &email, &password, &mut out)
        }
        Some(Commands::Login { email, password }) => {
            let password = read_password(password)?;
            cmd::auth::login(&store, &backend, &email, &password, &mut out)
        }
        Some(Commands::Logout { all }) => cmd::auth::logout(&store, all, &mut out),
        Some(Commands::Tasks(c)) => match c {
            TaskCommands::List {
                search,
                priority,
                label,
            } => {
                if !priority.is_empty() {
                    priority.parse::<Priority>()?;
                }
                let filter = TaskFilter {
                    search,
                    priority,
                    label,
                };
                cmd::tasks::list(&store, &backend, &filter, today, &mut out)
            }
            TaskCommands::Add {
                title,
                priority,
                deadline,
                description,
                start,
                end,
                assignee,
            } => {
                let input = TaskInput {
                    title,
                    description,
                    priority,
                    deadline,
                    start_time: start,
                    end_time: end,
                    assignee,
                };
                cmd::tasks::add(&store, &backend, input, &mut out)
            }
            TaskCommands::Toggle { id } => cmd::tasks::toggle(&store, &backend, &id, &mut out),
            TaskCommands::Delete { id } => cmd::tasks::delete(&store, &backend, &id, &mut out),
            TaskCommands::Assign { id, assignee } => {
                cmd::tasks::assign(&store, &backend, &id, &assignee, &mut out)
            }
            TaskCommands::Label { id, labels } => {
                cmd::tasks::label(&store, &backend, &id, &labels, &mut out)
            }
        },
        Some(Commands::Labels(c)) => match c {
            LabelCommands::List => cmd::labels::list(&store, &backend, &mut out),
            LabelCommands::Add { name } => cmd::labels::add(&store, &backend, &name, &mut out),
        },
        Some(Commands::Notes(c)) => match c {
            NoteCommands::List => cmd::notes::list(&store, &mut out),
            NoteCommands::Add { title, content } => {
                cmd::notes::add(&store, NoteInput { title, content }, &mut out)
            }
            NoteCommands::Delete { id } => cmd::notes::delete(&store, &id, &mut out),
        },
        Some(Commands::Goals(c)) => match c {
            GoalCommands::List => cmd::goals::list(&store, &mut out),
            GoalCommands::Add {
                title,
                category,
                description,
            } => {
                let input = GoalInput {
                    title,
                    description,
                    category,
                };
                cmd::goals::add(&store, input, &mut out)
            }
            GoalCommands::Bump { id, to } => cmd::goals::bump(&store, &id, to, &mut out),
            GoalCommands::Delete { id } => cmd::goals::delete(&store, &id, &mut out),
        },
        Some(Commands::Checklists(c)) => match c {
            ChecklistCommands::List => cmd::checklists::list(&store, &mut out),
            ChecklistCommands::Add { title, description } => {
                cmd::checklists::add(&store, &title, &description, &mut out)
            }
            ChecklistCommands::AddItem { checklist_id, text } => {
                cmd::checklists::add_item(&store, &checklist_id, &text, &mut out)
            }
            ChecklistCommands::ToggleItem {
                checklist_id,
                item_id,
            } => cmd::checklists::toggle_item(&store, &checklist_id, &item_id, &mut out),
            ChecklistCommands::DeleteItem {
                checklist_id,
                item_id,
            } => cmd::checklists::delete_item(&store, &checklist_id, &item_id, &mut out),
            ChecklistCommands::Delete { checklist_id } => {
                cmd::checklists::delete(&store, &checklist_id, &mut out)
            }
        },
        Some(Commands::Assignees { query }) => {
            cmd::assignees::run(&store, query.as_deref(), &mut out)
        }
        Some(Commands::Profile(c)) => match c {
            ProfileCommands::Show => cmd::profile::show(&store, &mut out),
            ProfileCommands::Set {
                username,
                email,
                avatar,
                bio,
            } => {
                let edit = ProfileEdit {
                    username,
                    email,
                    avatar,
                    bio,
                };
                cmd::profile::set(&store, edit, &mut out)
            }
        },
        Some(Commands::Settings(c)) => match c {
            SettingsCommands::Show => cmd::settings::show(&store, &mut out),
            SettingsCommands::Set {
                theme,
                email_notifications,
                task_reminders,
                compact_view,
                sound,
            } => {
                let edit = SettingsEdit {
                    theme,
                    email_notifications,
                    task_reminders,
                    compact_view,
                    sound_enabled: sound,
                };
                cmd::settings::set(&store, edit, &mut out)
            }
        },
        Some(Commands::Holidays { year }) => {
            cmd::holidays::run(year.unwrap_or_else(|| today.year()), &mut out)
        }
        Some(Commands::Calendar { month, print }) => {
            let month = month
                .as_deref()
                .map(cmd::calendar::parse_month)
                .transpose()?;
            if print {
                let month = month.unwrap_or(today);
                cmd::calendar::print(&store, &backend, month, today, &mut out)
            } else {
                cmd::root::run(&store, &backend, month)
            }
        }
        Some(Commands::Affirmation) => cmd::affirmation::run(&mut rand::thread_rng(), &mut out),
    }
}

fn read_password(password: Option<String>) -> anyhow::Result<String> {
    let stdin = std::io::stdin();
    cmd::auth::password_or_prompt(password, &mut stdin.lock(), &mut std::io::stderr())
}
