//! Single-choice selection prompts

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::collections::VecDeque;

use crate::error::{Error, Result};

/// Pick one item out of a list
pub trait Prompt {
    /// Index of the chosen item in `items`
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize>;
}

/// Arrow-key menu on the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize> {
        if items.is_empty() {
            return Err(Error::NotFound(format!("Nothing to choose from: {}", title)));
        }

        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }
}

/// Answers from a fixed script, for tests and non-interactive runs
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    /// Each answer is matched against the item labels of one `select` call
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize> {
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| Error::NotFound(format!("No scripted answer for: {}", title)))?;

        items
            .iter()
            .position(|item| *item == answer)
            .ok_or_else(|| Error::NotFound(format!("'{}' is not one of the choices", answer)))
    }
}

/// Use `preset` when given, otherwise ask `prompt`
///
/// Lets command-line flags skip a menu while still checking the value is one
/// of the offered items.
pub fn choose(
    prompt: &mut dyn Prompt,
    title: &str,
    items: &[String],
    preset: Option<&str>,
) -> Result<usize> {
    match preset {
        Some(wanted) => items
            .iter()
            .position(|item| item == wanted)
            .ok_or_else(|| Error::NotFound(format!("'{}' is not one of the choices", wanted))),
        None => prompt.select(title, items),
    }
}
