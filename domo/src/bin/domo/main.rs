mod commands;
mod context;
mod examples;
mod loader;
mod output;
mod theme;

use anyhow::Result;
use clap::{Command, CommandFactory, FromArgMatches, Parser, Subcommand};

use commands::{
    init::{InitArgs, handle_init},
    schema::{SchemaCommands, handle_schema_commands},
};
use examples::{command_examples, environment_help};
use output::{GlobalOptions, OutputFormat, OutputManager};

#[derive(Parser)]
#[command(name = "domo", version)]
#[command(
    about = "Dataset schema snapshots and drift checks for Domo",
    long_about = "Keeps a JSON snapshot of each dataset's schema next to the code that writes \
                  it, and compares snapshots against exported remote schemas. `schema diff` and \
                  `schema check` exit with status 1 when a dataset has drifted."
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize domo in the current project
    Init(InitArgs),

    /// Show, diff and check dataset schemas
    #[command(subcommand)]
    Schema(SchemaCommands),
}

fn cli_command() -> Command {
    command_examples().iter().fold(
        Cli::command().after_long_help(environment_help()),
        |command, example| command.mut_subcommand(example.name, |sub| sub.after_long_help(example.render())),
    )
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = match Cli::from_arg_matches(&cli_command().get_matches()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let code = match execute(cli).await {
        Ok(false) => 0,
        Ok(true) => 1,
        Err(err) => {
            eprintln!("Error: {err:#}");
            1
        }
    };
    std::process::exit(code);
}

/// Resolves to `true` when a checked dataset has drifted.
async fn execute(cli: Cli) -> Result<bool> {
    let options = GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };
    if options.no_color {
        colored::control::set_override(false);
    }
    let output = OutputManager::new(options);

    match cli.command {
        Commands::Init(args) => {
            handle_init(args, &output).await?;
            Ok(false)
        }
        Commands::Schema(command) => handle_schema_commands(command, &output).await,
    }
}
