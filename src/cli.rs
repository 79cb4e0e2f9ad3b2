use clap::{Parser, Subcommand};

/// Command line interface for the application
#[derive(Parser)]
#[command(version, about = "Interactive harness for the Zoho Recruit and OpenAI embedding APIs")]
pub struct Cli {
    /// Optional YAML file overriding endpoints, model and defaults
    #[arg(short, long)]
    pub config: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "warn"
    #[arg(long, default_value_t = String::from("warn"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under `logs/`
    #[arg(long, default_value_t = false)]
    pub log_file: bool,

    /// Run a single action and exit instead of starting the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch a job opening and print its extracted fields
    Fetch {
        /// Job opening identifier
        job_id: String,
        /// Print the raw API response as well
        #[arg(long)]
        raw: bool,
    },
    /// Fetch a job opening and embed it
    Embed {
        /// Job opening identifier
        job_id: String,
    },
    /// Exchange a one-time authorization code for an access token
    Token {
        /// Authorization code generated in the self client console
        code: String,
    },
    /// Check that the embedding provider answers with the expected dimensionality
    Check,
}
