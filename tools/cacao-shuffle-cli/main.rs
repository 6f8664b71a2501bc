use cacao_shuffle::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Converts a CACAO security playbook into a Shuffle workflow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the CACAO playbook JSON file
    input: PathBuf,

    /// Where to write the Shuffle workflow JSON
    #[arg(short, long, default_value = "shuffle.json")]
    output: PathBuf,

    /// Seed for generated identifiers, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Handle an extra command type with a built-in parser, as TYPE=BUILTIN
    #[arg(long = "map", value_name = "TYPE=BUILTIN", value_parser = parse_mapping)]
    mappings: Vec<(String, String)>,

    /// Timeout, in seconds, set on translated HTTP actions
    #[arg(long, default_value = "10")]
    http_timeout: String,

    /// Enable TLS verification on translated HTTP actions
    #[arg(long)]
    verify_tls: bool,

    /// Print a summary of the translated workflow
    #[arg(short, long)]
    summary: bool,

    /// Fail when any step had to be skipped
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Loading ---
    let playbook = Playbook::from_file(&cli.input).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load playbook '{}': {}",
            cli.input.display(),
            e
        ))
    });
    tracing::info!("Loaded playbook '{}' ({})", playbook.name, playbook.id);

    // --- 2. Translation ---
    let mut builder = Translator::builder().with_http_defaults(&cli.http_timeout, cli.verify_tls);
    for (user_type, builtin_type) in &cli.mappings {
        builder = builder.with_type_mapping(user_type, builtin_type);
    }
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }
    let mut translator = builder.build();

    let translate_start = Instant::now();
    let translation = translator.translate_with_report(&playbook);
    let translate_duration = translate_start.elapsed();

    // --- 3. Writing ---
    translation.workflow.save(&cli.output).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to write workflow '{}': {}",
            cli.output.display(),
            e
        ))
    });

    // --- 4. Results ---
    if cli.summary {
        println!("{}", WorkflowSummary(&translation.workflow));
    }

    let diagnostics = &translation.diagnostics;
    if !diagnostics.is_empty() {
        println!("\n--- Diagnostics ({}) ---", diagnostics.len());
        for diagnostic in diagnostics.iter() {
            let level = match diagnostic.severity() {
                Severity::Error => "skipped ",
                Severity::Warning => "degraded",
            };
            println!("  [{}] {}", level, diagnostic);
        }
    }

    println!(
        "\nWrote {} actions and {} branches to '{}' (translation {:?}, total {:?})",
        translation.workflow.actions.len(),
        translation.workflow.branches.len(),
        cli.output.display(),
        translate_duration,
        total_start.elapsed()
    );

    if cli.strict && diagnostics.has_errors() {
        exit_with_error("One or more steps were skipped (--strict)");
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "cacao_shuffle=info",
        1 => "cacao_shuffle=debug",
        _ => "cacao_shuffle=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_mapping(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((user_type, builtin)) if !user_type.is_empty() && !builtin.is_empty() => {
            Ok((user_type.to_string(), builtin.to_string()))
        }
        _ => Err(format!("expected TYPE=BUILTIN, got '{}'", raw)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
