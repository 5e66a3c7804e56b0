//! Garland CLI entry point.

use garland_foundation::Value;
use garland_runtime::{Repl, Session};
use std::env;
use std::fs;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    command: Option<String>,
    file: Option<String>,
    seed: Option<u64>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("--seed requires a value".into());
                }
                config.seed = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --seed value: {}", args[i]))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            positional => {
                if config.command.is_none() {
                    config.command = Some(positional.to_string());
                } else if config.file.is_none() {
                    config.file = Some(positional.to_string());
                } else {
                    return Err(format!("unexpected argument: {positional}").into());
                }
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("garland {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut session = Session::new();
    if let Some(seed) = config.seed {
        session = session.with_seed(seed);
    }

    match config.command.as_deref() {
        // No command: interactive REPL
        None => {
            let mut repl = Repl::new()?.with_session(session);
            repl.run()?;
            Ok(())
        }

        // expand FILE: print the module after decorator expansion
        Some("expand") => {
            let file = require_file(&config, "expand")?;
            let source =
                fs::read_to_string(file).map_err(|e| format!("failed to read {file}: {e}"))?;
            let expanded = session.expand_source(&source)?;
            println!("{expanded}");
            Ok(())
        }

        // run FILE: load the module and call its main function
        Some("run") => {
            let file = require_file(&config, "run")?;
            let name = session.load_file(file)?;
            if session.has_function(&name, "main", 0) {
                let result = session.call(&name, "main", &[])?;
                if result != Value::Nil {
                    println!("{result}");
                }
            }
            Ok(())
        }

        // check FILE: parse and expand, reporting the first error
        Some("check") => {
            let file = require_file(&config, "check")?;
            let source =
                fs::read_to_string(file).map_err(|e| format!("failed to read {file}: {e}"))?;
            session.check_source(&source)?;
            println!("\x1b[32mOK\x1b[0m {file}");
            Ok(())
        }

        Some(other) => Err(format!("unknown command: {other} (expected expand, run, or check)").into()),
    }
}

fn require_file<'a>(
    config: &'a CliConfig,
    command: &str,
) -> Result<&'a str, Box<dyn std::error::Error>> {
    match config.file.as_deref() {
        Some(file) => Ok(file),
        None => Err(format!("{command} requires a file argument").into()),
    }
}

fn print_help() {
    println!(
        "\x1b[1mGarland\x1b[0m - Decorator expansion engine and REPL

\x1b[1mUSAGE:\x1b[0m
    garland [OPTIONS] [COMMAND] [FILE]

\x1b[1mCOMMANDS:\x1b[0m
    expand FILE    Expand a module and print the transformed source
    run FILE       Load a module and call its main function
    check FILE     Parse and expand a module, reporting errors

\x1b[1mOPTIONS:\x1b[0m
    -h, --help       Print help information
    -V, --version    Print version information
    --seed N         Seed for deterministic generated names

\x1b[1mEXAMPLES:\x1b[0m
    garland                          Start interactive REPL
    garland expand app.gar           Print app.gar after decorator expansion
    garland run app.gar              Load app.gar and call (main)
    garland check app.gar            Verify app.gar expands cleanly
    garland --seed 7 expand app.gar  Expand with a fixed name seed

\x1b[1mREPL COMMANDS:\x1b[0m
    (def name value)         Define a value in the scratch module
    (defn name [args] body)  Define a function
    (load \"path\")            Load and expand a .gar module file
    Ctrl+D                   Exit REPL
    Ctrl+C                   Cancel current input

For more information, visit https://github.com/garland-lang/garland"
    );
}
