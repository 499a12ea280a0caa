mod args_parser;
mod builtins;
mod config;
mod cwd;
mod error;
mod interpreter;
mod prompt;
mod readline;
mod utils;

use std::io::{self, Read, Write};

use anyhow::Result;
use clap::Parser;

use args_parser::split_line;
use config::Cli;
use cwd::WorkingDir;
use interpreter::{Interpreter, Status};
use prompt::Prompt;
use readline::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Stopped,
}

fn init_tracing (level: &str) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

/// Prompt, read, split, execute until `exit` or end of input.
fn repl<R, O, E> (reader: &mut Reader<R>, interpreter: &mut Interpreter<O, E>, prompt: &Prompt) -> Result<()>
where
    R: Read,
    O: Write,
    E: Write,
{
    let mut state = State::Running;

    while state == State::Running {
        let text = prompt.render(interpreter.cwd());
        interpreter.write_prompt(&text)?;

        let line = match reader.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::debug!("end of input");
                break;
            }
            Err(err) => {
                interpreter.report(&err);
                break;
            }
        };

        let args = split_line(&line);
        let status = interpreter.execute(&args);
        tracing::trace!(status = status.code(), "command finished");

        if status == Status::Stop {
            state = State::Stopped;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let prompt = Prompt::lookup();
    let mut reader = Reader::new(io::stdin().lock());
    let mut interpreter = Interpreter::new(cli.name, WorkingDir::from_process(), io::stdout(), io::stderr());

    repl(&mut reader, &mut interpreter, &prompt)
}
