//! Command-line interface for srcprint
//! Pretty-prints Python source into one of the registered formats.
//!
//! Usage:
//!   srcprint                      - Read standard input, write LaTeX
//!   srcprint `<path>`             - Read a file, write tags
//!   srcprint `<path>` -f latex    - Pick the format explicitly
//!   srcprint --list-formats       - List all available formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use srcprint::srcprint::config::{Loader, SrcprintConfig};
use srcprint::srcprint::formats::FormatRegistry;
use srcprint::srcprint::processor::{available_formats, process, OutputFormat, ProcessingError};
use std::fs::File;
use std::io::{self, BufReader};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = Command::new("srcprint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pretty-print Python source as tagged tokens or LaTeX")
        .arg(
            Arg::new("path")
                .help("Python source file (reads standard input when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'tag', 'latex', 'token-json')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./srcprint.toml"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on characters that start no token")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tab-size")
                .long("tab-size")
                .help("Column width of a tab when measuring indentation")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let registry = FormatRegistry::with_defaults();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = handle_print_command(&matches, &config, &registry) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Build the configuration: defaults, ./srcprint.toml, --config, then scanner flags
fn load_config(matches: &ArgMatches) -> Result<SrcprintConfig, config::ConfigError> {
    let mut loader = Loader::new().with_local_file(".");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("strict") {
        loader = loader.with_strict(true)?;
    }
    if let Some(tab_size) = matches.get_one::<u64>("tab-size") {
        loader = loader.with_tab_size(*tab_size)?;
    }
    loader.build()
}

/// Handle the default command: print a file or standard input
fn handle_print_command(
    matches: &ArgMatches,
    config: &SrcprintConfig,
    registry: &FormatRegistry,
) -> Result<(), ProcessingError> {
    let path = matches.get_one::<String>("path");
    let format_name = match matches.get_one::<String>("format") {
        Some(format) => format.as_str(),
        None => config.default_format(path.is_some()),
    };
    let format = OutputFormat::from_string(format_name, registry)?;
    let options = config.scanner_options();

    let stdout = io::stdout();
    let mut output = stdout.lock();
    match path {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                eprintln!("Error reading file: {}", e);
                std::process::exit(1);
            });
            process(BufReader::new(file), &mut output, &format, &options, registry)?;
        }
        None => {
            let stdin = io::stdin();
            process(stdin.lock(), &mut output, &format, &options, registry)?;
        }
    }
    Ok(())
}

/// Handle the list-formats flag
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in available_formats(registry) {
        let description = registry
            .get(&name)
            .map(|formatter| formatter.description())
            .unwrap_or("Raw token stream dump");
        println!("  {}", name);
        println!("    {}", description);
    }
}
