//! The host boundary: prompting, confirmation and notifications.
//!
//! Commands never talk to the terminal directly. They go through [`Host`],
//! which the binary implements with [`ConsoleHost`] and tests implement with
//! a scripted double.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use log::{debug, error, info, warn};

use crate::error::{Result, ScaffoldError};

/// Notification level shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

pub trait Host {
    /// Ask for a line of input; `None` means the user dismissed the prompt
    fn prompt(&self, message: &str) -> Option<String>;

    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> bool;

    fn notify(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.notify(Severity::Warning, message);
    }
}

/// Prompt until a non-blank answer is given. Dismissing the prompt cancels.
pub fn prompt_required(host: &dyn Host, message: &str) -> Result<String> {
    loop {
        match host.prompt(message) {
            None => return Err(ScaffoldError::Cancelled),
            Some(answer) if answer.trim().is_empty() => debug!("Blank answer, asking again"),
            Some(answer) => return Ok(answer.trim().to_string()),
        }
    }
}

/// Terminal host. Pre-supplied answers are consumed before stdin is read.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    answers: RefCell<VecDeque<String>>,
    assume_yes: bool,
}

impl ConsoleHost {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            answers: RefCell::new(VecDeque::new()),
            assume_yes,
        }
    }

    /// Queue an answer for the next prompt
    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.answers.borrow_mut().push_back(answer.into());
        self
    }

    fn read_line(&self, message: &str) -> Option<String> {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{}: ", message);
        let _ = stdout.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                warn!("Failed to read from stdin: {}", e);
                None
            }
        }
    }
}

impl Host for ConsoleHost {
    fn prompt(&self, message: &str) -> Option<String> {
        if let Some(answer) = self.answers.borrow_mut().pop_front() {
            return Some(answer);
        }
        self.read_line(message)
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            info!("{} (assumed yes)", message);
            return true;
        }
        match self.read_line(&format!("{} [y/N]", message)) {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => {
                info!("{}", message);
                println!("{}", message);
            }
            Severity::Warning => {
                warn!("{}", message);
                eprintln!("warning: {}", message);
            }
            Severity::Error => {
                error!("{}", message);
                eprintln!("error: {}", message);
            }
        }
    }
}
