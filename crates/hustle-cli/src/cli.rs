use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(name = "hustle")]
#[command(version, about = "Plan posts, tasks, contacts and goals from the terminal")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "HUSTLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of the local store (overrides the config file)
    #[arg(long, global = true, env = "HUSTLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the terminal dashboard (default)
    Open {
        /// Route to start on: "#/", "#/pricing" or "#/app"
        #[arg(long)]
        route: Option<String>,
    },

    /// Print one section of the dashboard
    Render {
        /// overview, calendar, todos, contacts, goals, notes, metrics,
        /// export, landing or pricing
        target: String,

        /// Print the HTML fragment instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Write the backup file
    Export {
        /// Directory to write into (defaults to the configured export dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the stored data with a backup file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Replace the stored data with the sample set
    Seed,

    /// Open the checkout link of a plan (starter, boss or ceo)
    OpenPlan {
        plan: String,
    },
}

impl Command {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}
