#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "clientele: browse a customer roster from the terminal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (default: pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, environment, and TTY detection.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List customers",
        long_about = "List one page of customers with optional zone and search filters.",
        after_help = "EXAMPLES:\n    # First page of every customer\n    clientele list\n\n    # Customers in one zone, searched by name or email\n    clientele list --zone Norte --search ana\n\n    # A specific page, machine-readable\n    clientele list --page 3 --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "List the zones present in the data",
        long_about = "List every distinct zone in the data set with its record count.",
        after_help = "EXAMPLES:\n    # Zones with counts\n    clientele zones\n\n    # Machine-readable\n    clientele zones --json"
    )]
    Zones(cmd::zones::ZonesArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Browse customers in a full-screen terminal UI",
        long_about = "Open the interactive roster browser: live search, a zone picker, and page navigation.",
        after_help = "EXAMPLES:\n    # Browse the configured data file\n    clientele browse\n\n    # Browse a specific export\n    clientele browse --data exports/clients.json"
    )]
    Browse(cmd::browse::BrowseArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    clientele completions bash\n\n    # Generate zsh completions\n    clientele completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLIENTELE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "clientele=debug,info"
        } else {
            "clientele=info,warn"
        })
    });

    let format = env::var("CLIENTELE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let output = cli.output_mode();

    let command_result = match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &project_root),
        Commands::Zones(ref args) => cmd::zones::run_zones(args, output, &project_root),
        Commands::Browse(ref args) => cmd::browse::run_browse(args, &project_root),
        Commands::Completions(ref args) => cmd::completions::run_completions(args),
    };

    if let Err(err) = command_result {
        output::render_failure(output, &err)?;
        std::process::exit(1);
    }
    Ok(())
}
