//! Interactive prompts.
//!
//! Workflows ask questions through the [`Prompter`] trait so the decision
//! logic runs the same against a terminal ([`TerminalPrompter`]) and a
//! pre-recorded script ([`ScriptedPrompter`]).

use crate::error::{DflowError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::collections::VecDeque;
use std::io::ErrorKind;

/// Checks a typed answer; `Err` holds the message shown to the user.
pub type InputValidator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

pub trait Prompter {
    /// Ask for a line of text. An empty answer takes `default` when given.
    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: InputValidator<'_>,
    ) -> Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Pick one of `items`; returns its index.
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Pick any number of `items`; returns their indices.
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;
}

/// Prompts on the terminal with `dialoguer`.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn prompt_error(err: dialoguer::Error) -> DflowError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == ErrorKind::Interrupted => DflowError::Cancelled,
        other => DflowError::Prompt(other.to_string()),
    }
}

impl Prompter for TerminalPrompter {
    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: InputValidator<'_>,
    ) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|value: &String| validate(value.trim()));
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map(|value| value.trim().to_string())
            .map_err(prompt_error)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact()
            .map_err(prompt_error)
    }
}

/// A pre-recorded answer for [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Typed text; an empty string accepts the default.
    Text(String),
    Confirm(bool),
    Select(usize),
    MultiSelect(Vec<usize>),
    /// Behave as if the user pressed Ctrl+C.
    Cancel,
}

/// Answers prompts from a queue and records every question asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.asked.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Cancel) => Err(DflowError::Cancelled),
            Some(answer) => Ok(answer),
            None => Err(DflowError::Prompt(format!("no scripted answer for '{prompt}'"))),
        }
    }
}

fn unexpected(prompt: &str, answer: &Answer) -> DflowError {
    DflowError::Prompt(format!("scripted answer {answer:?} does not fit '{prompt}'"))
}

impl Prompter for ScriptedPrompter {
    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: InputValidator<'_>,
    ) -> Result<String> {
        let answer = self.next(prompt)?;
        let Answer::Text(text) = &answer else {
            return Err(unexpected(prompt, &answer));
        };
        let value = match (text.trim(), default) {
            ("", Some(default)) => default.to_string(),
            (text, _) => text.to_string(),
        };
        validate(&value).map_err(DflowError::Prompt)?;
        Ok(value)
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String], _default: usize) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Select(index) if index < items.len() => Ok(index),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        match self.next(prompt)? {
            Answer::MultiSelect(indices) if indices.iter().all(|i| *i < items.len()) => {
                Ok(indices)
            }
            other => Err(unexpected(prompt, &other)),
        }
    }
}

/// Validator for answers that must not be blank.
pub fn required_input(value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        return Err("a value is required".to_string());
    }
    Ok(())
}

/// Validator for answers that must be usable as a branch name.
pub fn branch_name_input(value: &str) -> std::result::Result<(), String> {
    crate::validate::validate(value).map_err(|reason| reason.to_string())
}
