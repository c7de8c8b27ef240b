use anyhow::{bail, Result};
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub debug: bool,
    pub dry_run: bool,
    pub help: bool,
}

/// Parse command-line arguments (program name already stripped).
///
/// Supported forms:
///   trello2wr
///   trello2wr --debug
///   trello2wr --config ./config.toml --dry-run
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => parsed.config = Some(PathBuf::from(path)),
                    None => bail!("Missing value for -c/--config flag"),
                }
            }
            "--debug" => parsed.debug = true,
            "-n" | "--dry-run" => parsed.dry_run = true,
            "-h" | "--help" => parsed.help = true,
            other => bail!("Unknown argument '{other}'. Run with --help for usage."),
        }
        i += 1;
    }

    Ok(parsed)
}

pub fn print_help() {
    println!("trello2wr — weekly A&O report from your Trello board\n");
    println!("USAGE:");
    println!("  trello2wr [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -c, --config <path>  Config file (default ~/.trello2wr/config.toml)");
    println!("      --debug          Print progress while fetching and building the report");
    println!("  -n, --dry-run        Print the mailto URI instead of opening the mail client");
    println!("  -h, --help           Show this help");
}
