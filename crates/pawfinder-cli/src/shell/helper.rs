use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::command::COMMAND_NAMES;

/// Rustyline helper: command completion and hints, breed completion after
/// `breed add`, and highlighting of known commands.
#[derive(Clone, Default)]
pub struct ShellHelper {
    breeds: Vec<String>,
}

impl ShellHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Breed names offered after `breed add ` / `breed rm `.
    pub fn set_breeds(&mut self, breeds: Vec<String>) {
        self.breeds = breeds;
    }

    fn breed_argument(line: &str) -> Option<usize> {
        ["breed add ", "breed rm "]
            .iter()
            .find(|prefix| line.starts_with(*prefix))
            .map(|prefix| prefix.len())
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(start) = Self::breed_argument(line) {
            let typed = line[start..].to_lowercase();
            let candidates = self
                .breeds
                .iter()
                .filter(|breed| breed.to_lowercase().starts_with(&typed))
                .map(|breed| Pair {
                    display: breed.clone(),
                    replacement: breed.clone(),
                })
                .collect();
            return Ok((start, candidates));
        }

        if !line.contains(' ') {
            let candidates = COMMAND_NAMES
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let head = line.split_whitespace().next().unwrap_or_default();
        if line.starts_with(head) && COMMAND_NAMES.contains(&head) {
            Owned(format!("{}{}", head.bright_cyan(), &line[head.len()..]))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMAND_NAMES
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ShellHelper {}
