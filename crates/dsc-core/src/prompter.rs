//! Interactive prompt handling.

use std::sync::{Mutex, PoisonError};

use anyhow::Result;

/// Trait for interactive terminal prompts.
pub trait Prompter: Send + Sync + std::fmt::Debug {
    /// Prompt for free-text input.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    /// Prompt for password input (hidden).
    fn password(&self, prompt: &str) -> Result<String>;

    /// Prompt for yes/no confirmation.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Dialoguer-based prompter implementation.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = dialoguer::Input::new().with_prompt(prompt);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        Ok(dialoguer::Password::new().with_prompt(prompt).interact()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

/// Stub prompter for testing that returns pre-configured answers.
///
/// Answers are consumed in order; when a queue runs dry the default is
/// returned (an empty string for passwords).
#[derive(Debug, Default)]
pub struct StubPrompter {
    /// Pre-configured input answers.
    pub input_answers: Mutex<Vec<String>>,
    /// Pre-configured password answers.
    pub password_answers: Mutex<Vec<String>>,
    /// Pre-configured confirm answers.
    pub confirm_answers: Mutex<Vec<bool>>,
    /// Every prompt shown, in order.
    pub prompts: Mutex<Vec<String>>,
}

impl StubPrompter {
    fn record(&self, prompt: &str) {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
    }
}

fn next_answer<T>(queue: &Mutex<Vec<T>>) -> Option<T> {
    let mut answers = queue.lock().unwrap_or_else(PoisonError::into_inner);
    (!answers.is_empty()).then(|| answers.remove(0))
}

impl Prompter for StubPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        self.record(prompt);
        Ok(next_answer(&self.input_answers).unwrap_or_else(|| default.to_string()))
    }

    fn password(&self, prompt: &str) -> Result<String> {
        self.record(prompt);
        Ok(next_answer(&self.password_answers).unwrap_or_default())
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.record(prompt);
        Ok(next_answer(&self.confirm_answers).unwrap_or(default))
    }
}
