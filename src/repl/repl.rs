use std::io::{self, BufRead, Write};

use log::{debug, error};

use crate::{compiler::compiler::compile, display_error, errors::errors::Error, interpret};

pub const PROMPT: &str = "\n>> ";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Also print the stack machine listing of every evaluated line
    pub show_stack: bool,
}

/// Runs one line through the pipeline and formats the successful result as
/// `tree = value`, followed by the stack machine listing when requested.
pub fn run_line(line: &str, options: &ReplOptions) -> Result<String, Error> {
    let evaluation = interpret(line)?;
    let mut rendered = format!("{} = {}", evaluation.tree, evaluation.value);

    if options.show_stack {
        let program = compile(&evaluation.tree)?;
        rendered.push('\n');
        rendered.push_str(&program.to_string());
    }

    Ok(rendered)
}

/// Like [`run_line`], but renders failures as a diagnostic pointing into `line`.
pub fn render_line(line: &str, options: &ReplOptions) -> String {
    match run_line(line, options) {
        Ok(rendered) => rendered,
        Err(err) => {
            error!("{}", err);
            display_error(&err, line)
        }
    }
}

/// Reads lines from `input` until it is exhausted, writing results to `output`.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, options: ReplOptions) -> io::Result<()> {
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let source = line.trim_end_matches(['\n', '\r']);
        if source.trim().is_empty() {
            continue;
        }

        debug!("evaluating {:?}", source);
        writeln!(output, "{}", render_line(source, &options))?;
    }
}
