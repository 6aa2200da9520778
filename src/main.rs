use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use sitekit::{
    generate, init_logging, load_or_generate, validate_layout, FileLayoutStore, LayoutStore,
};

const USAGE: &str = "\
sitekit <command> [options]

Commands:
  generate              Print the factory layout as JSON
  validate [--dir DIR]  Validate the stored layout (or the factory layout)
  reset    [--dir DIR]  Clear the stored layout
  stats    [--dir DIR]  Print equipment counts for the current layout

Options:
  --dir DIR   Storage directory for the layout slot (default: current dir)
";

fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprint!("{USAGE}");
        return Ok(false);
    };
    let dir = storage_dir(&args)?;

    match command {
        "generate" => {
            let catalog = generate();
            let json = serde_json::to_string_pretty(&catalog)
                .context("failed to serialize generated layout")?;
            println!("{json}");
            Ok(true)
        }
        "validate" => {
            let store = FileLayoutStore::new(&dir);
            let catalog = load_or_generate(&store);
            let report = validate_layout(&catalog);
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize validation report")?;
            println!("{json}");
            Ok(report.valid)
        }
        "reset" => {
            let mut store = FileLayoutStore::new(&dir);
            store.clear().context("failed to clear stored layout")?;
            println!("cleared {}", store.path().display());
            Ok(true)
        }
        "stats" => {
            let store = FileLayoutStore::new(&dir);
            let catalog = load_or_generate(&store);
            for (kind, count) in sitekit::kind_counts(&catalog) {
                println!("{count:>5}  {kind:?}");
            }
            println!("{:>5}  total", catalog.len());
            Ok(true)
        }
        other => {
            eprintln!("unknown command: {other}");
            eprint!("{USAGE}");
            Ok(false)
        }
    }
}

fn storage_dir(args: &[String]) -> anyhow::Result<PathBuf> {
    match args.iter().position(|arg| arg == "--dir") {
        Some(pos) => args
            .get(pos + 1)
            .map(PathBuf::from)
            .context("--dir requires a path"),
        None => Ok(PathBuf::from(".")),
    }
}
