//! Line-oriented console I/O behind the interactive flows.

use crate::error::{AppError, AppResult};
use std::io::{BufRead, Write};

/// Marker printed before every answer.
pub const ANSWER_MARKER: &str = "--- ";

/// Something that can show text and ask for one line of input.
pub trait Prompter {
    fn say(&mut self, text: &str) -> AppResult<()>;

    /// Prints `prompt` (if any) and the answer marker, then reads one line
    /// without its line terminator.
    fn ask(&mut self, prompt: &str) -> AppResult<String>;
}

pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsolePrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn say(&mut self, text: &str) -> AppResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> AppResult<String> {
        writeln!(self.output)?;
        if !prompt.is_empty() {
            writeln!(self.output, "{prompt}")?;
        }
        write!(self.output, "{ANSWER_MARKER}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
