use callsig::utils::logging;
use callsig::{log_debug, log_error, ParserConfig, SignatureParser};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "callsig")]
#[command(about = "Parse and canonicalize contract call signatures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the parsed tree as JSON instead of canonical text
    #[arg(long, global = true)]
    json: bool,

    /// Maximum nesting depth (tuples and array suffixes)
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// JSON file with parser limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a full signature, e.g. `bark(uint256,bool)`
    Decode { signature: String },
    /// Parse a bare type list, e.g. `uint256,bool`
    Raw { types: String },
    /// Parse a single type, e.g. `address[][3]`
    Type { ty: String },
    /// Report whether a type is dynamically sized
    Dynamic { ty: String },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        logging::enable_debug();
    }

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            log_error!("cli", "command failed", error = err);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let config = load_config(cli)?;
    let parser = SignatureParser::new(config);

    let output = match &cli.command {
        Command::Decode { signature } => {
            let selector = parser.parse_selector(signature)?;
            log_debug!("cli", "decoded", function = selector.function, params = selector.types.len());
            if cli.json {
                serde_json::to_string_pretty(&selector)?
            } else {
                selector.signature()
            }
        }
        Command::Raw { types } => {
            let types = parser.parse_type_list(types)?;
            if cli.json {
                serde_json::to_string_pretty(&types)?
            } else {
                types
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Type { ty } => {
            let ty = parser.parse_type(ty)?;
            if cli.json {
                serde_json::to_string_pretty(&ty)?
            } else {
                ty.to_string()
            }
        }
        Command::Dynamic { ty } => {
            let ty = parser.parse_type(ty)?;
            let dynamic = ty.is_dynamic();
            if cli.json {
                serde_json::to_string_pretty(&json!({
                    "type": ty.to_string(),
                    "dynamic": dynamic,
                }))?
            } else if dynamic {
                "dynamic".to_string()
            } else {
                "static".to_string()
            }
        }
    };

    Ok(output)
}

fn load_config(cli: &Cli) -> Result<ParserConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => ParserConfig::from_json(&fs::read_to_string(path)?)?,
        None => ParserConfig::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config = config.with_max_depth(max_depth);
    }
    config.validate()?;
    Ok(config)
}
