//! Interactive console used by the generator shell

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

/// Line-oriented prompt and message channel
#[async_trait]
pub trait Console: Send {
    /// Show `message` without a trailing newline and read one line of input.
    ///
    /// Returns the line without its terminator, or [`Error::InputClosed`] at end of input.
    async fn prompt(&mut self, message: &str) -> Result<String>;

    /// Print one line of output
    fn say(&mut self, line: &str) -> Result<()>;

    /// Print several lines in order
    fn say_all(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }
}

/// Console over the process's stdin and stdout
pub struct StdConsole {
    input: BufReader<Stdin>,
}

impl StdConsole {
    /// Attach to the process's standard streams
    pub fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn prompt(&mut self, message: &str) -> Result<String> {
        {
            let mut stdout = io::stdout().lock();
            stdout.write_all(message.as_bytes())?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(strip_line_ending(line))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unix_and_windows_endings() {
        assert_eq!(strip_line_ending("abc\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc\r\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc".to_string()), "abc");
        assert_eq!(strip_line_ending("  spaced  \n".to_string()), "  spaced  ");
    }
}
