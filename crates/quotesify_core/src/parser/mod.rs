//! Command-line parser.
//!
//! # Responsibility
//! - Turn one raw input line into a [`Command`].
//! - Split structural commands into a type tag and an untouched payload.
//!
//! # Invariants
//! - Parsing never fails: unknown verbs yield `None`, malformed payloads are
//!   left for the handler, which reports a typed error.

pub mod grammar;

use crate::error::{CommandError, CommandResult};
use crate::list::ListKind;
use grammar::split_leading_token;

pub const VERB_ADD: &str = "add";
pub const VERB_EDIT: &str = "edit";
pub const VERB_DELETE: &str = "delete";
pub const VERB_LIST: &str = "list";
pub const VERB_FIND: &str = "find";
pub const VERB_DONE: &str = "done";
pub const VERB_EXIT: &str = "bye";

/// Type tag plus the payload that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedArgs {
    pub tag: String,
    pub payload: String,
}

impl TypedArgs {
    /// Splits `remainder` on its first whitespace boundary only.
    pub fn from_remainder(remainder: &str) -> Self {
        match split_leading_token(remainder) {
            Some((tag, payload)) => Self {
                tag: tag.to_string(),
                payload: payload.to_string(),
            },
            None => Self {
                tag: String::new(),
                payload: String::new(),
            },
        }
    }

    /// Resolves the tag into a collection kind.
    pub fn kind(&self) -> CommandResult<ListKind> {
        if self.tag.is_empty() {
            return Err(CommandError::MissingRequiredField("type"));
        }
        self.tag
            .parse::<ListKind>()
            .map_err(CommandError::UnknownEntityType)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(TypedArgs),
    Edit(TypedArgs),
    Delete(TypedArgs),
    List(TypedArgs),
    Find(TypedArgs),
    Done(TypedArgs),
    Exit,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Add(_) => VERB_ADD,
            Self::Edit(_) => VERB_EDIT,
            Self::Delete(_) => VERB_DELETE,
            Self::List(_) => VERB_LIST,
            Self::Find(_) => VERB_FIND,
            Self::Done(_) => VERB_DONE,
            Self::Exit => VERB_EXIT,
        }
    }

    pub fn args(&self) -> Option<&TypedArgs> {
        match self {
            Self::Add(args)
            | Self::Edit(args)
            | Self::Delete(args)
            | Self::List(args)
            | Self::Find(args)
            | Self::Done(args) => Some(args),
            Self::Exit => None,
        }
    }

    /// Whether a successful run changes collections and must be persisted.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Add(_) | Self::Edit(_) | Self::Delete(_) | Self::Done(_)
        )
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }
}

/// Parses one input line. Returns `None` for blank input and unknown verbs.
pub fn parse_command(line: &str) -> Option<Command> {
    let (verb, remainder) = split_leading_token(line)?;
    let args = || TypedArgs::from_remainder(remainder);
    let command = match verb {
        VERB_ADD => Command::Add(args()),
        VERB_EDIT => Command::Edit(args()),
        VERB_DELETE => Command::Delete(args()),
        VERB_LIST => Command::List(args()),
        VERB_FIND => Command::Find(args()),
        VERB_DONE => Command::Done(args()),
        VERB_EXIT => Command::Exit,
        _ => return None,
    };
    Some(command)
}
