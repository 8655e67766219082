use crate::domain::account::UserCredentials;
use crate::error::Result;
use rust_decimal::Decimal;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Prompt/response plumbing for the interactive console.
///
/// Generic over any `BufRead` source and `Write` sink so flows can be driven
/// from byte slices in tests and from piped stdin end to end. Reaching the
/// end of input is not an error: prompts return `None` and the caller winds
/// down.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn print(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    pub fn println(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints a prompt and reads one line. `None` means end of input.
    pub fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.print(prompt)?;
        self.read_line()
    }

    /// Prompts until the user enters a whole number.
    pub fn prompt_for_int(&mut self, prompt: &str) -> Result<Option<i64>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.println("Please enter a whole number.")?,
            }
        }
    }

    /// Prompts until the user enters a decimal amount.
    pub fn prompt_for_decimal(&mut self, prompt: &str) -> Result<Option<Decimal>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match line.parse::<Decimal>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.println("Please enter a valid amount.")?,
            }
        }
    }

    pub fn prompt_for_credentials(&mut self) -> Result<Option<UserCredentials>> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(None);
        };
        Ok(Some(UserCredentials { username, password }))
    }
}
