//! Command-line interface for syncheck
//!
//! Checks whitespace-tokenized input against an LL(1) grammar table, with
//! automatic error recovery, and prints the parse trace plus the verdict.
//!
//! Usage:
//!   syncheck `<table>` `[inputs]...`        - Check files (stdin when omitted)
//!   syncheck `<table>` --format json      - Emit the run summary as JSON

use clap::{Arg, ArgAction, Command};
use std::io::Read;
use syncheck::checker::Checker;
use syncheck::grammar::GrammarTable;
use syncheck::lexing::TokenStream;

fn main() {
    let matches = Command::new("syncheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validates token streams against an LL(1) grammar table, with error recovery")
        .arg(
            Arg::new("table")
                .help("Path to the grammar table file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("inputs")
                .help("Input files to check; stdin is read when none are given")
                .action(ArgAction::Append)
                .num_args(0..)
                .index(2),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .get_matches();

    let table_path = match matches.get_one::<String>("table") {
        Some(path) => path,
        None => {
            eprintln!("Missing grammar table path");
            std::process::exit(1);
        }
    };
    let table = GrammarTable::from_file(table_path).unwrap_or_else(|e| {
        eprintln!("Failed to load grammar table: {}", e);
        std::process::exit(1);
    });

    let inputs: Vec<&String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.collect())
        .unwrap_or_default();
    let source = read_inputs(&inputs).unwrap_or_else(|e| {
        eprintln!("Failed to read input: {}", e);
        std::process::exit(1);
    });

    let mut checker = Checker::new(&table, TokenStream::from_source(&source));
    checker.run();

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => {
            let rendered = serde_json::to_string_pretty(&checker.summary()).unwrap_or_else(|e| {
                eprintln!("Failed to serialize summary: {}", e);
                std::process::exit(1);
            });
            println!("{}", rendered);
        }
        _ => {
            for line in checker.report().lines() {
                println!("{}", line);
            }
        }
    }
}

/// Concatenate all input files in order, or stdin when none are given
fn read_inputs(paths: &[&String]) -> Result<String, std::io::Error> {
    if paths.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    let mut combined = String::new();
    for path in paths {
        combined.push_str(&std::fs::read_to_string(path)?);
        combined.push('\n');
    }
    Ok(combined)
}
