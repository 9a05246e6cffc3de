//! art - a local, file-based version control system.

mod commands;
mod config;
mod core;
mod store;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "art")]
#[command(about = "A local, file-based version control system")]
#[command(version)]
#[command(author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new repository
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        dir: String,
    },

    /// Clone a repository handle into a fresh directory
    Clone {
        /// Remote handle, e.g. "teammate/project"
        handle: String,
        /// Destination directory (default: derived from the handle)
        dest: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Key to read or write, e.g. "user.name" or "repo.description"
        key: Option<String>,
        /// Value to set
        value: Option<String>,
        /// Operate on the global configuration file
        #[arg(long)]
        global: bool,
        /// List all configured keys
        #[arg(long)]
        list: bool,
        /// Remove a key
        #[arg(long)]
        unset: bool,
    },

    /// Show the working tree status
    Status,

    /// Stage a path for the next commit
    Add {
        /// File or directory to stage
        path: String,
    },

    /// Record staged changes as a commit
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// List, create, or delete branches
    Branch {
        /// Branch to create or delete
        name: Option<String>,
        /// Delete the named branch
        #[arg(short = 'd', long)]
        delete: bool,
    },

    /// Switch the working tree to another branch
    Checkout {
        /// Branch to switch to
        target: String,
        /// Discard local changes if the working tree is dirty
        #[arg(short, long)]
        force: bool,
    },

    /// Merge another branch into the active branch
    Merge {
        /// Branch to merge in
        branch: String,
    },

    /// Get or set the configured remote handle
    Remote {
        /// New remote handle to record
        url: Option<String>,
    },

    /// Validate the configured remote
    Fetch,

    /// Fetch and merge the configured remote
    Pull,

    /// Validate the configured remote
    Push,

    /// Show commit history on the active branch
    Log,

    /// Show staged changes against the active branch's last commit
    Diff,

    /// Shelve or restore uncommitted working-tree changes
    Stash {
        /// save (default), pop, or list
        action: Option<String>,
    },

    /// Move the active branch's head, clearing the stage
    Reset {
        /// Commit hash to reset to (default: clear the stage only)
        hash: Option<String>,
    },

    /// Remove a tracked path from the working tree
    Rm {
        /// Path to remove
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { dir } => commands::init(&dir),
        Commands::Clone { handle, dest } => commands::clone(&handle, dest.as_deref()),
        Commands::Config { key, value, global, list, unset } => {
            commands::config(key.as_deref(), value.as_deref(), global, list, unset)
        }
        Commands::Status => commands::status(),
        Commands::Add { path } => commands::add(&path),
        Commands::Commit { message } => commands::commit(&message),
        Commands::Branch { name, delete } => commands::branch(name.as_deref(), delete),
        Commands::Checkout { target, force } => commands::checkout(&target, force),
        Commands::Merge { branch } => commands::merge(&branch),
        Commands::Remote { url } => commands::remote(url.as_deref()),
        Commands::Fetch => commands::fetch(),
        Commands::Pull => commands::pull(),
        Commands::Push => commands::push(),
        Commands::Log => commands::log(),
        Commands::Diff => commands::diff(),
        Commands::Stash { action } => commands::stash(action.as_deref()),
        Commands::Reset { hash } => commands::reset(hash.as_deref()),
        Commands::Rm { path } => commands::rm(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
