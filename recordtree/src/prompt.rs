//! Text prompt transport.
//!
//! Every interactive step asks one question at a time and blocks until a
//! line of input arrives. [`LinePrompter`] talks to any reader/writer pair
//! (usually the terminal); [`ScriptedPrompter`] answers from a queue and
//! records what was shown, for scripted sessions and tests.

use std::{
    collections::VecDeque,
    io::{self, BufRead, Stdin, StdinLock, Stdout, Write},
};

/// Errors raised by a prompt transport.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("prompt I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("input ended while waiting for: {question:?}")]
    EndOfInput { question: String },
}

/// Line-oriented question/answer channel.
pub trait Prompter {
    /// Show `question` and return the next line of input without its line
    /// terminator.
    fn ask(&mut self, question: &str) -> Result<String, PromptError>;

    /// Show an informational line.
    fn say(&mut self, line: &str) -> Result<(), PromptError>;

    /// Ask a yes/no question; see [`is_yes`].
    fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let answer = self.ask(question)?;
        Ok(is_yes(&answer))
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        (**self).ask(question)
    }

    fn say(&mut self, line: &str) -> Result<(), PromptError> {
        (**self).say(line)
    }

    fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        (**self).confirm(question)
    }
}

/// Only `y` (any case) counts as yes.
pub fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y")
}

/// Prompter over a buffered reader and a writer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process terminal.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        self.output.write_all(question.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput {
                question: question.to_string(),
            });
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    fn say(&mut self, line: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}

/// Prompter answering from a fixed queue.
///
/// Every question and informational line is kept in order in the transcript.
/// Running out of answers behaves like end of input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Questions and lines shown so far.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Number of answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        self.transcript.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::EndOfInput {
                question: question.to_string(),
            })
    }

    fn say(&mut self, line: &str) -> Result<(), PromptError> {
        self.transcript.push(line.to_string());
        Ok(())
    }
}
