use atty; // for checking if stdin is a TTY
use clap::{Arg, ArgAction, Command};
use serde::Deserialize;
use serde_yaml;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

mod extract;
mod types;
mod writer;

/// Default output root when neither the CLI nor the config names one
const DEFAULT_OUTPUT_ROOT: &str = "project-root";

/// Config for optional YAML (`md2src.yml` / `md2src.yaml`)
#[derive(Debug, Deserialize)]
struct Md2srcConfig {
    /// Default output root directory.
    #[serde(default)]
    output_root: Option<String>,
    /// Require the code fence to start right after its heading.
    #[serde(default)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let matches = Command::new("md2src")
        .version("0.1.0")
        .about("md2src: splits a markdown document back into source files, one file per backtick-quoted heading and fenced code block.")
        .arg(
            Arg::new("input")
                .help("Markdown document to extract from (reads stdin when piped)")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output root directory (default: project-root)")
                .required(false),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Only pair a heading with a fence that follows it immediately")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // Load optional YAML config; CLI flags take precedence
    let config = load_config_file()?;

    let debug_mode = matches.get_flag("debug");
    let (output_root, strict) = resolve_options(
        matches.get_one::<String>("output").cloned(),
        matches.get_flag("strict"),
        config.as_ref(),
    );

    // Read the whole document up front; the scan works on the full text
    let markdown = match matches.get_one::<String>("input") {
        Some(path) => read_source_document(path)?,
        None => {
            if atty::is(atty::Stream::Stdin) {
                return Err(
                    "No input file given and stdin is a terminal; pass a markdown file or pipe one in"
                        .into(),
                );
            }
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let files = extract::extract_files(&markdown, strict, debug_mode);
    if debug_mode {
        eprintln!("Matched {} heading+fence pairs", files.len());
    }

    let written = writer::write_files(&files, Path::new(&output_root))?;
    println!("Extracted {} files to {}", written, output_root);

    Ok(())
}

/// Fold the optional config into the CLI flags; the CLI wins where both speak.
fn resolve_options(
    cli_output: Option<String>,
    cli_strict: bool,
    config: Option<&Md2srcConfig>,
) -> (String, bool) {
    let strict = cli_strict || config.map_or(false, |c| c.strict);
    let output_root = cli_output
        .or_else(|| config.and_then(|c| c.output_root.clone()))
        .unwrap_or_else(|| DEFAULT_OUTPUT_ROOT.to_string());
    (output_root, strict)
}

fn read_source_document(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Could not read {}: {}", path, e))
}

/// Attempt to load config from md2src.yml or md2src.yaml, returning None if not found.
fn load_config_file() -> Result<Option<Md2srcConfig>, Box<dyn Error>> {
    for candidate in &["md2src.yml", "md2src.yaml"] {
        if Path::new(candidate).exists() {
            let text = fs::read_to_string(candidate)?;
            let config: Md2srcConfig = serde_yaml::from_str(&text)?;
            eprintln!("Loaded config from {}", candidate);
            return Ok(Some(config));
        }
    }
    Ok(None)
}
