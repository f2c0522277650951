use std::{env, io, process::ExitCode};

use env_logger::Env;
use log::error;
use pizzascript::{
    display_error,
    repl::repl::{run_line, start, ReplOptions},
};

fn main() -> ExitCode {
    // LOG_LEVEL=off, error, info, debug or trace
    env_logger::Builder::from_env(Env::new().filter_or("LOG_LEVEL", "info")).init();

    let mut options = ReplOptions::default();
    let mut expression = vec![];

    for arg in env::args().skip(1) {
        if arg == "--stack" {
            options.show_stack = true;
        } else {
            expression.push(arg);
        }
    }

    if expression.is_empty() {
        match env::var("USER") {
            Ok(user) => println!("Hello {}! This is the PizzaScript programming language!", user),
            Err(_) => println!("Hello! This is the PizzaScript programming language!"),
        }
        println!("Feel free to type in commands");

        return match start(io::stdin().lock(), io::stdout(), options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("failed to read input: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    let source = expression.join(" ");
    match run_line(&source, &options) {
        Ok(rendered) => {
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", display_error(&err, &source));
            ExitCode::FAILURE
        }
    }
}
