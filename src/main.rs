mod ast;
mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod lexer;
mod parser;
mod token;
mod value;

use clap::Parser as ClapParser;
use config::{VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use env::Environment;
use eval::eval_program;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

/// A tree-walking interpreter for a small dynamically-typed scripting language
#[derive(ClapParser, Debug)]
#[command(name = "monkey-lang")]
#[command(version = VERSION)]
#[command(about = "A tree-walking interpreter for a small dynamically-typed scripting language")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Exit instead of starting the REPL when no script is given
    #[arg(long = "no-repl")]
    no_repl: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();

    match args.script {
        Some(path) => run_script(&path),
        None if args.no_repl => {
            println!("input file required");
            ExitCode::FAILURE
        }
        None => {
            run_repl();
            ExitCode::SUCCESS
        }
    }
}

fn run_script(path: &PathBuf) -> ExitCode {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("cannot read script file {}: {}", path.display(), e);
            eprintln!("cannot read script file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let env = Environment::new();
    let (program, errors) = parser::parse(&contents);
    if !errors.is_empty() {
        println!("parser errors:");
        for msg in &errors {
            log::error!("parse error: {}", msg);
            println!("\t{}", msg);
        }
        return ExitCode::FAILURE;
    }

    let result = eval_program(&program, env);
    if let value::Object::Error(msg) = &result {
        log::error!("eval error: {}", msg);
        eprintln!("{}", msg);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run_repl() {
    let env = Environment::new();

    let config = Config::builder().auto_add_history(true).build();
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("failed to initialize REPL: {}", e);
            return;
        }
    };

    let history_file = ".monkey_history";
    let _ = rl.load_history(history_file);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);
    println!("type \"help\" for commands, \"exit\" or Ctrl-D to quit");

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit" || trimmed == "quit" {
                    println!("goodbye");
                    break;
                }
                if trimmed == "help" {
                    println!("{}", config::HELP_TEXT);
                    continue;
                }

                let (program, errors) = parser::parse(trimmed);
                if !errors.is_empty() {
                    for msg in &errors {
                        log::error!("parse error: {}", msg);
                        println!("\t{}", msg);
                    }
                    continue;
                }

                let result = eval_program(&program, Rc::clone(&env));
                println!("{}", result.inspect());
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\ngoodbye");
                break;
            }
            Err(err) => {
                log::error!("readline error: {}", err);
                eprintln!("error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
}
