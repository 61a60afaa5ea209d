use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use config_schema_core::{Model, Node, SchemaInstance, validate_tree};
use config_schema_discovery::split_search_path;
use config_schema_store::{LoadOutcome, LoaderConfig, SchemaLoader};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Search path used when neither `--schema-path` nor `--config` is given.
const DEFAULT_SCHEMA_PATH: &str = "/etc/config-schema";

/// Output format for `dump`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum DumpFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "config-schema")]
#[command(about = "Load, inspect and query configuration schema trees")]
struct Cli {
    /// Colon-separated list of schema directories.
    #[arg(long, global = true)]
    schema_path: Option<String>,
    /// Loader configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List schema files in processing order.
    Files,
    /// Print the loaded schema forest.
    Dump(DumpArgs),
    /// Resolve a path to its schema node.
    Lookup(LookupArgs),
    /// Translate a value through a node's enumeration.
    Translate(TranslateArgs),
    /// List model metadata in load order.
    Models,
    /// Check every schema file for structural problems.
    Validate,
}

#[derive(Debug, Args)]
struct DumpArgs {
    /// Output format.
    #[arg(long, default_value = "text")]
    format: DumpFormat,
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// Absolute schema path, e.g. /interfaces/eth0/mtu.
    path: String,
}

#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("direction").required(true).args(["to", "from"])))]
struct TranslateArgs {
    /// Absolute schema path of the enumerated node.
    path: String,
    /// Value to translate; omitted means "no value".
    value: Option<String>,
    /// Translate a stored value to its symbolic name.
    #[arg(long)]
    to: bool,
    /// Translate a symbolic name to its stored value.
    #[arg(long)]
    from: bool,
}

/// Serialized form of a forest for `dump --format json|yaml`.
#[derive(Serialize)]
struct ForestView<'a> {
    roots: Vec<&'a Node>,
    models: Vec<&'a Model>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = loader_config(&cli).and_then(|config| {
        let loader = SchemaLoader::new(config);
        match cli.command {
            Command::Files => run_files(&loader),
            Command::Dump(args) => run_dump(&loader, args),
            Command::Lookup(args) => run_lookup(&loader, args),
            Command::Translate(args) => run_translate(&loader, args),
            Command::Models => run_models(&loader),
            Command::Validate => run_validate(&loader),
        }
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the loader configuration: the config file if given, with
/// `--schema-path` overriding its search path.
fn loader_config(cli: &Cli) -> Result<LoaderConfig, String> {
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => LoaderConfig::from_search_path(DEFAULT_SCHEMA_PATH),
    };
    if let Some(path) = &cli.schema_path {
        config.search_path = split_search_path(path);
    }
    if config.search_path.is_empty() {
        return Err("No schema directories configured".to_string());
    }
    Ok(config)
}

fn load(loader: &SchemaLoader) -> SchemaInstance {
    let LoadOutcome {
        instance, failures, ..
    } = loader.load();
    for failure in &failures {
        eprintln!("warning: skipped {}: {}", failure.path.display(), failure.error);
    }
    instance
}

fn run_files(loader: &SchemaLoader) -> Result<(), String> {
    for path in loader.files() {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_dump(loader: &SchemaLoader, args: DumpArgs) -> Result<(), String> {
    let schema = load(loader);
    let view = ForestView {
        roots: schema.roots().collect(),
        models: schema.models().collect(),
    };

    match args.format {
        DumpFormat::Text => print!("{}", schema.dump()),
        DumpFormat::Json => {
            let raw = serde_json::to_string_pretty(&view)
                .map_err(|err| format!("Failed to serialize schema: {err}"))?;
            println!("{raw}");
        }
        DumpFormat::Yaml => {
            let raw = serde_yaml::to_string(&view)
                .map_err(|err| format!("Failed to serialize schema: {err}"))?;
            print!("{raw}");
        }
    }
    Ok(())
}

fn run_lookup(loader: &SchemaLoader, args: LookupArgs) -> Result<(), String> {
    let schema = load(loader);
    let node = schema
        .lookup(&args.path)
        .ok_or_else(|| format!("No schema node at '{}'", args.path))?;

    println!("name: {}", node.name());
    println!("leaf: {}", node.is_leaf());
    println!("readable: {}", node.is_readable());
    println!("writable: {}", node.is_writable());
    if let Some(default) = node.default_value() {
        println!("default: {default}");
    }
    if let Some(pattern) = node.pattern() {
        println!("pattern: {pattern}");
    }
    if let Some(description) = node.description() {
        println!("description: {description}");
    }
    Ok(())
}

fn run_translate(loader: &SchemaLoader, args: TranslateArgs) -> Result<(), String> {
    let schema = load(loader);
    let node = schema
        .lookup(&args.path)
        .ok_or_else(|| format!("No schema node at '{}'", args.path))?;

    let value = args.value.as_deref();
    let translated = if args.to {
        node.translate_to(value)
    } else {
        node.translate_from(value)
    };
    if let Some(translated) = translated {
        println!("{translated}");
    }
    Ok(())
}

fn run_models(loader: &SchemaLoader) -> Result<(), String> {
    let schema = load(loader);
    for model in schema.models() {
        println!(
            "{}\t{}\t{}",
            model.name().unwrap_or("-"),
            model.organization().unwrap_or("-"),
            model.version().unwrap_or("-")
        );
    }
    Ok(())
}

fn run_validate(loader: &SchemaLoader) -> Result<(), String> {
    let outcome = loader.load();
    let mut problems = outcome.failures.len();

    for failure in &outcome.failures {
        println!("{}: {}", failure.path.display(), failure.error);
    }
    for root in outcome.instance.roots() {
        for finding in validate_tree(root) {
            println!("{finding}");
            problems += 1;
        }
    }

    println!(
        "Checked {} schema file(s), {} problem(s).",
        outcome.files.len(),
        problems
    );
    if problems > 0 {
        return Err(format!("{problems} schema problem(s) found"));
    }
    Ok(())
}
