use clap::{Parser as ClapParser, Subcommand};
use resource_filter::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "rfilter")]
#[command(about = "rfilter - select cloud resource records with a Kusto-like filter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and run a filter query
    Check {
        /// The filter query, e.g. "where instance_id == '0' | sample 1"
        query: String,

        /// JSON records (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// Seed for `sample`, making the selection repeatable
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'rfilter docs' to list categories)
        category: String,
    },
}

fn main() {
    // RUST_LOG overrides the default of warnings only
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let result = match Cli::parse().command {
        Commands::Check {
            query,
            input,
            pretty,
            syntax_only,
            seed,
        } => read_records(input, syntax_only).and_then(|input| {
            run_check(CheckOptions {
                query,
                input,
                pretty,
                syntax_only,
                seed,
            })
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => {
            cli::get_doc_category(&category).map(|text| print!("{}", text))
        }
    };

    if let Err(e) = result {
        eprintln!("rfilter: {}", e);
        std::process::exit(1);
    }
}

/// Records come from `--input`, or from piped stdin when a run needs them.
fn read_records(input: Option<String>, syntax_only: bool) -> Result<Option<String>, CliError> {
    if input.is_some() || syntax_only || atty::is(atty::Stream::Stdin) {
        return Ok(input);
    }
    let mut piped = String::new();
    io::stdin().read_to_string(&mut piped)?;
    Ok(Some(piped))
}

fn run_check(options: CheckOptions) -> Result<(), CliError> {
    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(selected) if options.pretty => {
            println!("{}", serde_json::to_string_pretty(&selected)?)
        }
        CheckResult::Success(selected) => println!("{}", serde_json::to_string(&selected)?),
    }
    Ok(())
}
