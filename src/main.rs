use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskq::logging::{self, LogLevel};
use taskq::output::Format;
use taskq::store::DEFAULT_DIR;

#[derive(Parser)]
#[command(
    name = "taskq",
    version,
    about = "Priority task queue with dependency-gated completion"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    /// State directory (config.json, tasks.json)
    #[arg(long, global = true, default_value = DEFAULT_DIR)]
    dir: PathBuf,
    /// Log level (overrides TASKQ_LOG)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a pending task
    Add {
        /// Unique task name
        name: String,
        /// Integer priority, lower is more urgent
        #[arg(long, short, allow_hyphen_values = true)]
        priority: String,
        /// Names of existing tasks that must be completed first (comma-separated)
        #[arg(long, value_delimiter = ',')]
        depends_on: Vec<String>,
        /// Advisory deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },
    /// List pending tasks by priority
    List {
        /// Keep insertion order instead of sorting by priority
        #[arg(long)]
        unordered: bool,
    },
    /// Display one task and whether it can be worked on
    Show {
        /// Task name
        name: String,
    },
    /// Mark a pending task as completed
    Complete {
        /// Task name
        name: String,
    },
    /// Show which tasks each task is required by
    Deps,
    /// Report which pending tasks are executable and which are blocked
    Check,
    /// Show the most urgent executable task
    Next,
}

fn run(cli: Cli, format: Format) -> taskq::error::Result<()> {
    let root = cli.dir;
    match cli.command {
        Commands::Add {
            name,
            priority,
            depends_on,
            deadline,
        } => taskq::commands::add::run(&root, name, priority, depends_on, deadline, format),
        Commands::List { unordered } => taskq::commands::list::run(&root, unordered, format),
        Commands::Show { name } => taskq::commands::show::run(&root, name, format),
        Commands::Complete { name } => taskq::commands::complete::run(&root, name, format),
        Commands::Deps => taskq::commands::deps::run(&root, format),
        Commands::Check => taskq::commands::check::run(&root, format),
        Commands::Next => taskq::commands::next::run(&root, format),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        // Completion refusals exit 2, every other error 1.
        let code = if e.is_refusal() { 2 } else { 1 };
        std::process::exit(code);
    }
}
