use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use al_scaffold::{Host, Severity};

/// Host double with queued answers that records every notification
#[derive(Debug, Default)]
pub struct ScriptedHost {
    answers: RefCell<VecDeque<Option<String>>>,
    confirm_answer: bool,
    pub notifications: RefCell<Vec<(Severity, String)>>,
    pub questions: RefCell<Vec<String>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, answer: &str) -> Self {
        self.answers.borrow_mut().push_back(Some(answer.to_string()));
        self
    }

    /// Queue a dismissed prompt
    pub fn dismiss(self) -> Self {
        self.answers.borrow_mut().push_back(None);
        self
    }

    pub fn confirming(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Host for ScriptedHost {
    fn prompt(&self, _message: &str) -> Option<String> {
        self.answers.borrow_mut().pop_front().flatten()
    }

    fn confirm(&self, message: &str) -> bool {
        self.questions.borrow_mut().push(message.to_string());
        self.confirm_answer
    }

    fn notify(&self, severity: Severity, message: &str) {
        self.notifications.borrow_mut().push((severity, message.to_string()));
    }
}

/// Write `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("should create parent directory");
    }
    fs::write(&path, content).expect("should write file");
    path
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("invalid JSON in {}: {e}", path.display()))
}
