mod lookup;

use anyhow::{Context, Result};
use argstore::ArgumentStore;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, fmt};

use crate::lookup::{Kind, lookup};

/// Program name placed in front of the inspected arguments.
const PROGRAM_NAME: &str = "argstore";

#[derive(Parser)]
#[command(name = "argstore")]
#[command(version, about = "Inspect how dash-style options resolve", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every option and the values it was given
    Dump(DumpArgs),

    /// Resolve one option the way a program reading it would
    Get(GetArgs),
}

#[derive(Parser)]
struct DumpArgs {
    /// Print the store as JSON
    #[arg(long)]
    json: bool,

    /// Arguments to parse, given after `--`
    #[arg(last = true, value_name = "ARGS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct GetArgs {
    /// Option to look up; a leading dash is added if missing
    #[arg(value_name = "NAME", allow_hyphen_values = true)]
    name: String,

    /// How to read the option
    #[arg(short, long, value_enum, default_value = "string")]
    kind: Kind,

    /// Value used when the option is absent
    #[arg(short, long, value_name = "VALUE", allow_hyphen_values = true)]
    default: Option<String>,

    /// Fail on malformed values instead of falling back
    #[arg(long)]
    strict: bool,

    /// Print the lookup as JSON
    #[arg(long)]
    json: bool,

    /// Arguments to parse, given after `--`
    #[arg(last = true, value_name = "ARGS")]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump(args) => dump(args),
        Commands::Get(args) => get(args),
    }
}

fn store_from(tokens: &[String]) -> ArgumentStore {
    ArgumentStore::parse(std::iter::once(PROGRAM_NAME).chain(tokens.iter().map(String::as_str)))
}

fn dump(args: DumpArgs) -> Result<()> {
    tracing::debug!(count = args.tokens.len(), "executing dump command");
    let store = store_from(&args.tokens);

    let mut out = io::stdout().lock();
    if args.json {
        let json = serde_json::to_string_pretty(&store).context("failed to encode store as JSON")?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    for name in store.names() {
        writeln!(out, "{name} = {:?}", store.get_all(name))?;
    }
    Ok(())
}

fn get(args: GetArgs) -> Result<()> {
    tracing::debug!(name = %args.name, "executing get command");
    let store = store_from(&args.tokens);

    let found = lookup(
        &store,
        &args.name,
        args.kind,
        args.default.as_deref(),
        args.strict,
    )
    .with_context(|| format!("failed to resolve {}", args.name))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        println!("{}", found.value);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
