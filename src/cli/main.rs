//! omf: convert parsed MIB modules into OMF documents

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use omf_sdk::cli::commands::{ConvertArgs, handle_complete, handle_module, handle_tree};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "omf", version, about = "Build OMF module documents and OID trees")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assembled module view: scalars, tables, notifications, types
    Module(ConvertFlags),
    /// Single-module OID tree
    Tree(ConvertFlags),
    /// OID forest of a module and its imports
    Complete(ConvertFlags),
}

#[derive(Args)]
struct ConvertFlags {
    /// Module name, e.g. IF-MIB
    name: String,

    /// Directory searched for module files (repeatable)
    #[arg(short = 'p', long = "path")]
    paths: Vec<PathBuf>,

    /// Output format: json, yaml or toml
    #[arg(short, long)]
    format: Option<String>,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail when the result carries diagnostics
    #[arg(long)]
    strict: bool,

    /// Modules contributing to a composed tree: loaded or imports
    #[arg(long)]
    scope: Option<String>,

    /// Canonical root OID for single-module trees, e.g. 1.3.6.1
    #[arg(long)]
    root: Option<String>,
}

impl From<ConvertFlags> for ConvertArgs {
    fn from(flags: ConvertFlags) -> Self {
        Self {
            name: flags.name,
            paths: flags.paths,
            format: flags.format,
            output: flags.output,
            config: flags.config,
            strict: flags.strict,
            scope: flags.scope,
            root: flags.root,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "omf_sdk=debug" } else { "omf_sdk=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Module(flags) => {
            let args = ConvertArgs::from(flags);
            handle_module(&args).with_context(|| format!("omf module {}", args.name))
        }
        Command::Tree(flags) => {
            let args = ConvertArgs::from(flags);
            handle_tree(&args).with_context(|| format!("omf tree {}", args.name))
        }
        Command::Complete(flags) => {
            let args = ConvertArgs::from(flags);
            handle_complete(&args).with_context(|| format!("omf complete {}", args.name))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
