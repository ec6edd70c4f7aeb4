//! Erupt front end driver
//!
//! Reads a source file (or standard input), runs the lexer and the parser
//! over it and reports what they found.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;

use erupt::{
    ast::dump::dump_node_list,
    config::Config,
    errors::errors::{Diagnostics, Error, ErrorTip},
    get_line,
    lexer::lexer::tokenize,
    parser::parser::parse,
    LOG_VERBOSE,
};

const EXIT_ERROR: u8 = 1;
const EXIT_LEX_ERROR: u8 = 2;
const EXIT_PARSER_ERROR: u8 = 3;

/// Erupt front end
#[derive(Parser, Debug)]
#[command(name = "erupt")]
#[command(version, disable_version_flag = true)]
#[command(about = "Lexes and parses Erupt source files")]
struct Cli {
    /// Input source file, `-` reads standard input
    #[arg(value_name = "FILE")]
    input: String,

    /// Output name (default: the input file name without extension)
    #[arg(short, long, value_name = "NAME")]
    output: Option<String>,

    /// Show version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Log the progress of every phase
    #[arg(short = 'V', long)]
    verbose: bool,

    /// Show the generated tokens
    #[arg(short = 'T', long)]
    tokens: bool,

    /// Show the nodes of the generated AST
    #[arg(short = 'A', long)]
    ast: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();

            return if error.use_stderr() {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("erupt: fatal error: {:#}", error);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let (source, config) = read_source(&cli.input)?;
    let config = config
        .with_verbose(cli.verbose)
        .with_show_tokens(cli.tokens)
        .with_show_ast(cli.ast);

    let output = output_name(&cli.input, cli.output.as_deref());
    LOG_VERBOSE!(config, "compiling {} into {}", config.label, output);

    let start = Instant::now();
    let (tokens, diagnostics) = tokenize(&source, &config);
    info!("Tokenized in {:?}", start.elapsed());

    display_diagnostics(&diagnostics, &source);

    if config.show_tokens {
        print!("{}", tokens.dump());
    }

    if diagnostics.failed() {
        eprintln!("erupt: fatal error: lexer error(s) occurred, stopping compilation");
        return Ok(ExitCode::from(EXIT_LEX_ERROR));
    }

    let parse_start = Instant::now();
    let (nodes, diagnostics) = parse(tokens, &config);
    info!("Parsed in {:?}", parse_start.elapsed());

    display_diagnostics(&diagnostics, &source);

    if config.show_ast {
        print!("{}", dump_node_list(&nodes));
    }

    if diagnostics.failed() {
        eprintln!("erupt: fatal error: parser error(s) occurred, stopping compilation");
        return Ok(ExitCode::from(EXIT_PARSER_ERROR));
    }

    info!("Total time: {:?}", start.elapsed());

    Ok(ExitCode::SUCCESS)
}

fn read_source(input: &str) -> Result<(String, Config)> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read standard input")?;

        return Ok((source, Config::stdin()));
    }

    let source =
        fs::read_to_string(input).with_context(|| format!("failed to read '{}'", input))?;

    Ok((source, Config::new(input)))
}

/// `tests/string_error.er` -> `string_error`, standard input -> `stdin`.
fn output_name(input: &str, output: Option<&str>) -> String {
    if let Some(output) = output {
        return output.to_string();
    }

    if input == "-" {
        return String::from("stdin");
    }

    let file_name = Path::new(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());

    match file_name.split_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    }
}

fn display_diagnostics(diagnostics: &Diagnostics, source: &str) {
    for error in diagnostics {
        display_error(error, source);
    }
}

fn display_error(error: &Error, source: &str) {
    /*
        test.er:20: error: expected expression, found ')'
           |
        20 | x = )
           |
          tip: insert expression here
    */

    eprintln!("{}", error);

    let source_line = error
        .get_position()
        .line()
        .and_then(|line| get_line(source, line).map(|text| (line, text)));

    if let Some((line, text)) = source_line {
        let line_str = line.to_string();
        let padding = line_str.len() + 2;

        eprintln!("{:>padding$}", "|");
        eprintln!("{} | {}", line_str, text.trim_end());
        eprintln!("{:>padding$}", "|");
    }

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        eprintln!("  tip: {}", tip);
    }
}
