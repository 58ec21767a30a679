//! Command-line interface for chemeq
//! Parses chemical equations and prints them in one of the registered output formats.
//!
//! Usage:
//!   chemeq render [`<equation>`] [--format `<format>`] [--config `<path>`]  - Render an equation
//!   chemeq tokens [`<equation>`] [--config `<path>`]                       - Show the raw token stream
//!   chemeq list-formats                                                  - List available formats
//!
//! When the equation is omitted or `-`, it is read from stdin.

use chemeq::chem::config::{ChemConfig, Loader};
use chemeq::chem::equation::Equation;
use chemeq::chem::lexing::{lex_raw, tokenize_equation_with};
use clap::{Arg, ArgMatches, Command};
use std::io::Read;

fn main() {
    let matches = Command::new("chemeq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and typeset chemical equations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to a TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("render")
                .about("Render an equation")
                .arg(equation_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'text', 'html', 'treeviz'); defaults to render.default_format"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the raw and equation level tokens with their byte spans")
                .arg(equation_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("render", render_matches)) => {
            let source = read_equation(render_matches);
            let format = render_matches
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| config.render.default_format.clone());
            handle_render_command(&config, &source, &format);
        }
        Some(("tokens", tokens_matches)) => {
            let source = read_equation(tokens_matches);
            handle_tokens_command(&config, &source);
        }
        Some(("list-formats", _)) => handle_list_formats_command(&config),
        _ => unreachable!(),
    }
}

fn equation_arg() -> Arg {
    Arg::new("equation")
        .help("The equation, e.g. \"Cu(NO3)2 + 2 H2 -> 2 H2O\" (stdin when omitted or '-')")
        .index(1)
}

fn load_config(path: Option<&String>) -> ChemConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

fn read_equation(matches: &ArgMatches) -> String {
    match matches.get_one::<String>("equation").map(String::as_str) {
        Some("-") | None => {
            let mut source = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut source) {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            }
            source.trim_end_matches(['\n', '\r']).to_string()
        }
        Some(equation) => equation.to_string(),
    }
}

/// Handle the render command
fn handle_render_command(config: &ChemConfig, source: &str, format: &str) {
    let equation = Equation::parse_with(source, &config.parse_options());
    let output = config
        .registry()
        .serialize(&equation, format)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Handle the tokens command
fn handle_tokens_command(config: &ChemConfig, source: &str) {
    println!("raw:");
    for (token, span) in lex_raw(source) {
        let text = &source[span.clone()];
        println!("  {:>3}..{:<3} {:?} {:?}", span.start, span.end, token, text);
    }

    println!("equation:");
    for token in tokenize_equation_with(source, &config.parse_options()) {
        println!("  {:<8} {:?}", token.node_type(), token.source_text());
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &ChemConfig) {
    let registry = config.registry();
    println!("Available formats:\n");
    for formatter in registry.formatters() {
        println!("  {}", formatter.name());
        println!("    {}", formatter.description());
    }
}
