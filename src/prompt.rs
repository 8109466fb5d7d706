//! Prompt collaborator
//!
//! Interactive choices go through the `Prompter` trait so the resolution
//! logic stays testable. The terminal implementation uses `dialoguer`;
//! tests use `ScriptedPrompter` with queued answers.

use std::cell::RefCell;
use std::collections::VecDeque;

use dialoguer::{Confirm, Select};
use is_terminal::IsTerminal;

use crate::error::{FerryError, FerryResult};

/// Blocking interactive prompts.
pub trait Prompter {
    /// Present an ordered list of labels and return the chosen index.
    fn choose(&self, message: &str, labels: &[String]) -> FerryResult<usize>;

    /// Ask a yes/no question.
    fn confirm(&self, message: &str, default: bool) -> FerryResult<bool>;
}

/// Prompter backed by `dialoguer`, for real terminal sessions.
pub struct TermPrompter;

impl TermPrompter {
    fn ensure_tty() -> FerryResult<()> {
        if std::io::stdin().is_terminal() {
            Ok(())
        } else {
            Err(FerryError::Selection {
                message: "interactive prompt requires a terminal (use --alias or --prompt false)"
                    .to_string(),
            })
        }
    }
}

impl Prompter for TermPrompter {
    fn choose(&self, message: &str, labels: &[String]) -> FerryResult<usize> {
        Self::ensure_tty()?;
        Select::new()
            .with_prompt(message)
            .items(labels)
            .default(0)
            .interact()
            .map_err(|e| FerryError::Io(std::io::Error::other(e)))
    }

    fn confirm(&self, message: &str, default: bool) -> FerryResult<bool> {
        Self::ensure_tty()?;
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| FerryError::Io(std::io::Error::other(e)))
    }
}

/// Prompter that replays queued answers. Lives in the library so
/// integration tests can drive interactive paths without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    choices: RefCell<VecDeque<usize>>,
    confirms: RefCell<VecDeque<bool>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choices(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            choices: RefCell::new(choices.into_iter().collect()),
            confirms: RefCell::new(VecDeque::new()),
        }
    }

    pub fn queue_choice(&self, index: usize) {
        self.choices.borrow_mut().push_back(index);
    }

    pub fn queue_confirm(&self, answer: bool) {
        self.confirms.borrow_mut().push_back(answer);
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&self, message: &str, _labels: &[String]) -> FerryResult<usize> {
        self.choices
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| FerryError::Selection {
                message: format!("no scripted answer for prompt: {message}"),
            })
    }

    fn confirm(&self, _message: &str, default: bool) -> FerryResult<bool> {
        Ok(self.confirms.borrow_mut().pop_front().unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prompter_replays_choices_in_order() {
        let prompter = ScriptedPrompter::with_choices([2, 0]);
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        assert_eq!(prompter.choose("first", &labels).unwrap(), 2);
        assert_eq!(prompter.choose("second", &labels).unwrap(), 0);
        assert!(prompter.choose("third", &labels).is_err());
    }

    #[test]
    fn scripted_prompter_confirm_falls_back_to_default() {
        let prompter = ScriptedPrompter::new();
        prompter.queue_confirm(false);

        assert!(!prompter.confirm("queued", true).unwrap());
        assert!(prompter.confirm("default", true).unwrap());
        assert!(!prompter.confirm("default", false).unwrap());
    }
}
