//! Minimal command routing and the processed-command log
//!
//! `CommandRouter` maps lowercased command names to handlers. Every command
//! that reaches a handler is first written to a [`CommandLog`], which the
//! [`AssertCommands`] trait queries.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use super::assertions::{ensure, AssertionError, AssertionResult, Constraint};
use super::bot::{BotError, CommandContext};

/// `/name`, optional `@botname`, optional arguments after whitespace
static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/([A-Za-z0-9_]+)(?:@([A-Za-z0-9_]+))?(?:\s+([\s\S]*))?$").expect("Failed to compile command regex")
});

/// A command as parsed from message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased command name without the slash
    pub name: String,
    /// Bot username after `@`, if the command was addressed
    pub bot: Option<String>,
    /// Everything after the command token, trimmed
    pub text: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Arguments recorded in the command log
    pub fn record_arguments(&self) -> Map<String, Value> {
        let mut arguments = Map::new();
        arguments.insert("text".to_string(), json!(self.text));
        arguments.insert("args".to_string(), json!(self.args));
        arguments
    }
}

/// Parses `/name[@bot] [args...]`; `None` for anything else
pub fn parse_command(text: &str) -> Option<ParsedCommand> {
    let captures = COMMAND_RE.captures(text.trim_start())?;
    let rest = captures.get(3).map_or("", |m| m.as_str()).trim();

    Some(ParsedCommand {
        name: captures.get(1)?.as_str().to_lowercase(),
        bot: captures.get(2).map(|m| m.as_str().to_string()),
        text: rest.to_string(),
        args: rest.split_whitespace().map(str::to_string).collect(),
    })
}

pub type CommandHandler = Box<dyn Fn(&CommandContext<'_>) -> Result<(), BotError>>;

/// Name -> handler table
#[derive(Default)]
pub struct CommandRouter {
    handlers: BTreeMap<String, CommandHandler>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name` (case-insensitive, leading `/` optional)
    pub fn register_command<F>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(&CommandContext<'_>) -> Result<(), BotError> + 'static,
    {
        let name = name.trim_start_matches('/').to_lowercase();
        if self.handlers.insert(name.clone(), Box::new(handler)).is_some() {
            log::debug!("command /{name} handler replaced");
        }
        self
    }

    /// Registered command names, sorted
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn handler(&self, name: &str) -> Option<&CommandHandler> {
        self.handlers.get(&name.to_lowercase())
    }
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter").field("commands", &self.commands()).finish()
    }
}

/// One command that reached its handler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRecord {
    /// Lowercased command name
    pub name: String,
    pub arguments: Map<String, Value>,
}

/// Append-only log of processed commands
#[derive(Debug, Default)]
pub struct CommandLog {
    records: Mutex<Vec<CommandRecord>>,
}

impl CommandLog {
    pub fn record(&self, name: &str, arguments: Map<String, Value>) {
        let name = name.to_lowercase();
        log::debug!("command /{name} processed");
        self.records.lock().push(CommandRecord { name, arguments });
    }

    pub fn records(&self) -> Vec<CommandRecord> {
        self.records.lock().clone()
    }
}

/// Queries and assertions over processed commands
pub trait AssertCommands {
    /// Every processed command, in order
    fn command_records(&self) -> Vec<CommandRecord>;

    /// Records whose name is in `names` (case-insensitive); all records for an empty filter
    fn processed_commands(&self, names: &[&str]) -> Vec<CommandRecord> {
        let wanted: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();
        self.command_records()
            .into_iter()
            .filter(|record| wanted.is_empty() || wanted.contains(&record.name))
            .collect()
    }

    fn check_command_processed(&self, name: &str, constraint: Option<&Constraint>) -> AssertionResult {
        if matching_commands(self, name, constraint).is_empty() {
            return Err(AssertionError(format!("The expected [{name}] command was not handled.")));
        }
        Ok(())
    }

    fn check_command_not_processed(&self, name: &str, constraint: Option<&Constraint>) -> AssertionResult {
        if !matching_commands(self, name, constraint).is_empty() {
            return Err(AssertionError(format!("The unexpected [{name}] command was handled.")));
        }
        Ok(())
    }

    fn check_no_commands_processed(&self) -> AssertionResult {
        let count = self.command_records().len();
        if count > 0 {
            return Err(AssertionError(format!(
                "Expected no commands to be handled, but {count} command(s) were processed."
            )));
        }
        Ok(())
    }

    #[track_caller]
    fn assert_command_processed(&self, name: &str, constraint: Option<&Constraint>) {
        ensure(self.check_command_processed(name, constraint));
    }

    #[track_caller]
    fn assert_command_not_processed(&self, name: &str, constraint: Option<&Constraint>) {
        ensure(self.check_command_not_processed(name, constraint));
    }

    #[track_caller]
    fn assert_no_commands_processed(&self) {
        ensure(self.check_no_commands_processed());
    }
}

impl AssertCommands for CommandLog {
    fn command_records(&self) -> Vec<CommandRecord> {
        self.records()
    }
}

fn matching_commands<T: AssertCommands + ?Sized>(
    source: &T,
    name: &str,
    constraint: Option<&Constraint>,
) -> Vec<CommandRecord> {
    source
        .processed_commands(&[name])
        .into_iter()
        .filter(|record| constraint.map_or(true, |c| c.matches(&record.arguments)))
        .collect()
}
