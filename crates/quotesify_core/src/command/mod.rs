//! Command handlers.
//!
//! # Responsibility
//! - Validate payloads and mutate the [`Library`] through its link helpers.
//! - Return structured [`Report`]s; rendering belongs to the caller.
//!
//! # Invariants
//! - A handler either applies all invariant-linked mutations or none. The
//!   only partial outcomes are independent sub-steps reported as
//!   `Report::Warning`.
//! - Indices are re-resolved on every call and never cached.

mod add;
mod delete;
mod edit;
mod query;
mod report;

pub use report::{BookmarkEntry, CategorySummary, Report};

use crate::error::{CommandError, CommandResult};
use crate::library::Library;
use crate::parser::Command;
use crate::registry::ListRegistry;
use log::{info, warn};

impl Command {
    /// Runs the command against the registry's library.
    ///
    /// # Errors
    /// - `Configuration` when the registry is not initialised.
    /// - Any handler error from the taxonomy in [`CommandError`].
    pub fn execute(&self, registry: &mut ListRegistry) -> CommandResult<Vec<Report>> {
        let tag = self.args().map_or("-", |args| args.tag.as_str());
        let result = registry
            .library_mut()
            .map_err(CommandError::from)
            .and_then(|library| self.dispatch(library));

        match &result {
            Ok(reports) => info!(
                "event=command_execute module=command status=ok verb={} type={} reports={} warnings={}",
                self.verb(),
                tag,
                reports.len(),
                reports.iter().filter(|report| report.is_warning()).count()
            ),
            Err(err) => warn!(
                "event=command_execute module=command status=error verb={} type={} error_code={}",
                self.verb(),
                tag,
                err.code()
            ),
        }
        result
    }

    fn dispatch(&self, library: &mut Library) -> CommandResult<Vec<Report>> {
        match self {
            Self::Add(args) => add::execute(args.kind()?, &args.payload, library),
            Self::Edit(args) => edit::execute(args.kind()?, &args.payload, library),
            Self::Delete(args) => delete::execute(args.kind()?, &args.payload, library),
            Self::List(args) => query::list(args.kind()?, &args.payload, library),
            Self::Find(args) => query::find(args.kind()?, &args.payload, library),
            Self::Done(args) => query::done(args.kind()?, &args.payload, library),
            Self::Exit => Ok(Vec::new()),
        }
    }
}

/// Collects independent sub-step results: failures become warnings unless
/// every attempted step failed, in which case the first failure is returned.
fn merge_steps(steps: Vec<CommandResult<Report>>) -> CommandResult<Vec<Report>> {
    if steps.iter().all(Result::is_err) {
        if let Some(Err(err)) = steps.into_iter().next() {
            return Err(err);
        }
        return Ok(Vec::new());
    }
    Ok(steps
        .into_iter()
        .map(|step| step.unwrap_or_else(Report::Warning))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{merge_steps, Report};
    use crate::error::CommandError;
    use crate::parser::parse_command;
    use crate::registry::ListRegistry;

    #[test]
    fn merge_steps_returns_error_when_nothing_applied() {
        let err = merge_steps(vec![Err(CommandError::InvalidQuoteIndex(9))]).unwrap_err();
        assert_eq!(err, CommandError::InvalidQuoteIndex(9));
    }

    #[test]
    fn merge_steps_downgrades_partial_failures() {
        let reports = merge_steps(vec![
            Ok(Report::CategoryDeleted("x".to_string())),
            Err(CommandError::InvalidQuoteIndex(9)),
        ])
        .unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[1].is_warning());
    }

    #[test]
    fn execute_before_initialise_is_configuration_error() {
        let mut registry = ListRegistry::new();
        let command = parse_command("add book Dune /by Frank Herbert").unwrap();
        let err = command.execute(&mut registry).unwrap_err();
        assert!(matches!(err, CommandError::Configuration(_)));
    }
}
