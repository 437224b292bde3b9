use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use triagem_cli::config::{self, LogFormat, TriagemConfig};

mod commands;

/// triagem - psychometric screening questionnaires, scored locally
#[derive(Parser, Debug)]
#[command(name = "triagem", version)]
#[command(after_help = "\
Examples:
  triagem list                                   Show available instruments
  triagem take anxiety                           Answer a questionnaire interactively
  triagem score adhd --responses answers.json    Score a prepared set of answers
  triagem history --instrument depression        Past results for one instrument")]
struct Cli {
    /// Config file (default: <config dir>/triagem/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available instruments
    List,

    /// Show an instrument's questions and subscales
    Show { instrument: String },

    /// Answer an instrument interactively (numbers 0-4 or labels)
    Take { instrument: String },

    /// Score answers from a JSON file of question id -> answer
    Score {
        instrument: String,

        #[arg(long)]
        responses: PathBuf,

        /// Seconds the subject took to answer
        #[arg(long, default_value_t = 0)]
        elapsed: u64,

        /// Render with this Tera template instead of the built-in one
        #[arg(long)]
        template: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List past results
    History {
        #[arg(long)]
        instrument: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Aggregate statistics over past results
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = config::load_or_default(&config_path)?;
    init_tracing(&config);

    match cli.command {
        Commands::List => commands::list(&config),
        Commands::Show { instrument } => commands::show(&config, &instrument),
        Commands::Take { instrument } => commands::take(&config, &instrument),
        Commands::Score {
            instrument,
            responses,
            elapsed,
            template,
            json,
        } => commands::score(&config, &instrument, &responses, elapsed, template.as_deref(), json),
        Commands::History { instrument, json } => {
            commands::history(&config, instrument.as_deref(), json)
        }
        Commands::Stats { json } => commands::stats(&config, json),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_show(&config_path, &config),
            ConfigAction::Init { force } => commands::config_init(&config_path, force),
        },
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(config: &TriagemConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}
