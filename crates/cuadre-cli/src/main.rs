mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::{Query, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cuadre",
    version,
    about = "Reconcile agent account statements: transactions, deposits and sales from PDF"
)]
struct Cli {
    /// pdftotext executable to use (default: pdftotext on PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pdftotext: Option<PathBuf>,

    /// Seconds to wait for pdftotext before giving up
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom JSON label profile
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "preset")]
    profile: Option<PathBuf>,

    /// Predefined label profile (default: etecsa)
    #[arg(long, global = true, value_name = "NAME")]
    preset: Option<String>,

    /// Log extraction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the transaction table of a statement PDF
    Extract {
        /// Path to the statement PDF
        input_file: PathBuf,

        /// Data shape: records (default) or rows
        #[arg(short, long, default_value = "records")]
        format: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Minimum cells for a line to count as a table row (default: 4)
        #[arg(long, value_name = "N")]
        min_columns: Option<usize>,
    },
    /// List deduplicated transactions
    Transactions {
        input_file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },
    /// Total the deposits into the agent account
    Deposits {
        input_file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },
    /// Total sales per category and the agent's profit
    Sales {
        input_file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },
    /// Inspect and validate label profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Transaction outcome: all, successful (default) or failed
    #[arg(short, long, default_value = "successful")]
    status: String,

    /// Page number, starting at 1 (requires --limit)
    #[arg(long)]
    page: Option<usize>,

    /// Results per page, at least 5 (requires --page)
    #[arg(long)]
    limit: Option<usize>,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    output: String,
}

impl From<QueryArgs> for Query {
    fn from(args: QueryArgs) -> Self {
        Query {
            status: args.status,
            page: args.page,
            limit: args.limit,
            output: args.output,
        }
    }
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the labels of a profile (default: the active one)
    Show {
        /// Preset name (e.g., "etecsa")
        name: Option<String>,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings {
        pdftotext: cli.pdftotext,
        timeout: cli.timeout,
        profile: cli.profile,
        preset: cli.preset,
    };

    let result = match cli.command {
        Commands::Extract {
            input_file,
            format,
            output,
            min_columns,
        } => commands::extract::run(&settings, input_file, &format, &output, min_columns),
        Commands::Transactions { input_file, query } => {
            commands::analyze::transactions(&settings, input_file, &query.into())
        }
        Commands::Deposits { input_file, query } => {
            commands::analyze::deposits(&settings, input_file, &query.into())
        }
        Commands::Sales { input_file, query } => {
            commands::analyze::sales(&settings, input_file, &query.into())
        }
        Commands::Profile { action } => match action {
            ProfileAction::Show { name } => commands::profile::show(&settings, name.as_deref()),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
