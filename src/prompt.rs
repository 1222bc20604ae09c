// src/prompt.rs

//! Operator prompts for the interactive setup
//!
//! [`Prompter`] is generic over its input and output so the interactive flow
//! can be driven from a script or a test as well as from a terminal.

use crate::error::{Error, Result};
use std::io::{self, BufRead, Write};
use tracing::warn;

const TRUE_ANSWERS: &[&str] = &["y", "yes", "1", "on", ""];
const FALSE_ANSWERS: &[&str] = &["n", "no", "0", "off"];

/// Parse a yes/no answer; an empty answer means yes
pub fn strtobool(value: &str) -> Option<bool> {
    let value = value.trim().to_lowercase();
    if TRUE_ANSWERS.contains(&value.as_str()) {
        Some(true)
    } else if FALSE_ANSWERS.contains(&value.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Line-oriented question/answer over a reader and a writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one answer line; `None` when input is closed
    fn read_answer(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask a yes/no question until the answer parses
    pub fn prompt_bool(&mut self, question: &str) -> Result<bool> {
        loop {
            let answer = self
                .read_answer(&format!("{} [Y/n]: ", question))?
                .ok_or_else(|| Error::Aborted("no answer given, input closed".to_string()))?;
            match strtobool(&answer) {
                Some(value) => return Ok(value),
                None => {
                    warn!("invalid response: {:?}", answer);
                    warn!(
                        "valid answers are: {} (empty means yes)",
                        TRUE_ANSWERS
                            .iter()
                            .chain(FALSE_ANSWERS)
                            .filter(|a| !a.is_empty())
                            .copied()
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                }
            }
        }
    }

    /// Ask a free-form question; an empty answer returns `default`
    pub fn prompt(&mut self, question: &str, default: Option<&str>, lowercase: bool) -> Result<String> {
        let question = match default {
            Some(default) => format!("{} [{}] ", question, default),
            None => format!("{} ", question),
        };
        let answer = self
            .read_answer(&question)?
            .ok_or_else(|| Error::Aborted("no answer given, input closed".to_string()))?;

        let answer = if answer.is_empty() {
            default.unwrap_or_default().to_string()
        } else {
            answer
        };
        Ok(if lowercase { answer.to_lowercase() } else { answer })
    }

    /// Ask whether to continue; declining aborts the run
    pub fn prompt_continue(&mut self) -> Result<()> {
        if self.prompt_bool("do you want to continue?")? {
            Ok(())
        } else {
            Err(Error::Aborted("exiting ice setup script".to_string()))
        }
    }

    /// Write a line to the operator
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_strtobool() {
        for yes in ["y", "Y", "yes", "YES", "1", "on", "On", ""] {
            assert_eq!(strtobool(yes), Some(true), "{yes}");
        }
        for no in ["n", "N", "no", "No", "0", "off", "OFF"] {
            assert_eq!(strtobool(no), Some(false), "{no}");
        }
        assert_eq!(strtobool("maybe"), None);
        assert_eq!(strtobool("true"), None);
    }

    #[test]
    fn test_prompt_bool_reprompts() {
        let mut p = prompter("maybe\nsure\nno\n");
        assert!(!p.prompt_bool("continue?").unwrap());
        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown.matches("continue? [Y/n]: ").count(), 3);
    }

    #[test]
    fn test_prompt_bool_empty_is_yes() {
        let mut p = prompter("\n");
        assert!(p.prompt_bool("continue?").unwrap());
    }

    #[test]
    fn test_prompt_bool_eof_aborts() {
        let mut p = prompter("what\n");
        assert!(matches!(p.prompt_bool("continue?"), Err(Error::Aborted(_))));
    }

    #[test]
    fn test_prompt_default_and_lowercase() {
        let mut p = prompter("\nHTTPS\n");
        assert_eq!(p.prompt("protocol?", Some("http"), true).unwrap(), "http");
        assert_eq!(p.prompt("protocol?", Some("http"), true).unwrap(), "https");
    }

    #[test]
    fn test_prompt_trims() {
        let mut p = prompter("  /srv/ice  \n");
        assert_eq!(p.prompt("path?", None, false).unwrap(), "/srv/ice");
    }

    #[test]
    fn test_prompt_continue_declined() {
        let mut p = prompter("no\n");
        let err = p.prompt_continue().unwrap_err();
        assert_eq!(err.to_string(), "exiting ice setup script");
    }
}
