//! Cellsheet - Non-interactive driver for the cellsheet cell store

mod default_config;

use anyhow::{Context, Result};
use cellsheet_core::{SheetConfig, Spreadsheet};
use cellsheet_engine::engine::format_value;
use std::env;
use std::path::{Path, PathBuf};

fn print_usage() {
    eprintln!("Usage: cellsheet [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Spreadsheet file to load (.xml)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <NAME=CONTENT>  Set a cell (can be repeated)");
    eprintln!("  -c, --config <FILE>       Load sheet configuration from TOML file");
    eprintln!("  --no-default-config       Ignore the default config.toml");
    eprintln!("  -o, --output <FILE>       Save the spreadsheet after applying edits");
    eprintln!("  -h, --help                Print help");
}

struct Options {
    file_path: Option<PathBuf>,
    assignments: Vec<String>,
    config_file: Option<PathBuf>,
    no_default_config: bool,
    output_file: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut options = Options {
        file_path: None,
        assignments: Vec::new(),
        config_file: None,
        no_default_config: false,
        output_file: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-s" | "--set" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --set requires NAME=CONTENT");
                    std::process::exit(1);
                }
                options.assignments.push(args[i].to_string());
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                options.config_file = Some(PathBuf::from(&args[i]));
            }
            "--no-default-config" => {
                options.no_default_config = true;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(1);
                }
                options.output_file = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if options.file_path.is_none() {
                    options.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(options: Options) -> Result<()> {
    let config = match default_config::resolve_config_path(
        options.config_file,
        options.no_default_config,
    ) {
        Some(path) => load_config(&path)?,
        None => SheetConfig::default(),
    };

    let mut sheet = match &options.file_path {
        Some(path) => Spreadsheet::load_with_config(path, &config)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Spreadsheet::from_config(&config)?,
    };

    for assignment in &options.assignments {
        sheet
            .set_from_assignment(assignment)
            .with_context(|| format!("Failed to apply {:?}", assignment))?;
    }

    if let Some(output_path) = &options.output_file {
        sheet
            .save(output_path)
            .with_context(|| format!("Failed to save {}", output_path.display()))?;
    }

    print_cells(&sheet)?;
    Ok(())
}

fn load_config(path: &Path) -> Result<SheetConfig> {
    SheetConfig::load(path).with_context(|| format!("Failed to read config {}", path.display()))
}

/// One `NAME<TAB>CONTENTS<TAB>VALUE` line per non-empty cell, sorted by name.
fn print_cells(sheet: &Spreadsheet) -> Result<()> {
    let mut names: Vec<&str> = sheet.get_names_of_all_nonempty_cells().collect();
    names.sort();
    for name in names {
        let contents = sheet.get_cell_contents(name)?;
        let value = sheet.get_cell_value(name)?;
        println!(
            "{}\t{}\t{}",
            name,
            contents.to_input_string(),
            format_value(&value)
        );
    }
    Ok(())
}
