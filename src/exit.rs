//! Exit-code mapping and the process entry point.

use std::io::Write;

use crate::command::{CommandRef, CommandTree};
use crate::context::Context;
use crate::error::CliError;

impl CommandRef<'_> {
    /// Maps the outcome of a run to an exit code.
    ///
    /// Uses the exit hook when one is set. Otherwise success is 0,
    /// [`CliError::ExitCode`] carries its own code and everything else is 1.
    /// Errors other than usage errors and bare exit codes are written to
    /// `ctx.err`.
    pub fn exit(&self, ctx: &mut Context, err: Option<&CliError>) -> i32 {
        if let Some(hook) = &self.node().hooks.exit {
            return hook(ctx, err);
        }
        default_exit(ctx, err)
    }
}

fn default_exit(ctx: &mut Context, err: Option<&CliError>) -> i32 {
    let Some(err) = err else {
        return 0;
    };
    if !err.is_usage() && !err.is_exit_only() {
        if let Err(e) = writeln!(ctx.err, "{err}").and_then(|()| ctx.err.flush()) {
            tracing::warn!(error = %e, "Failed to report error");
        }
    }
    err.exit_code()
}

/// Runs `tree` with `args` and returns the exit code, without exiting.
///
/// Usage errors get the usage of the command they were raised at, falling
/// back to the command dispatch last entered and then to the root.
pub fn execute(tree: &CommandTree, ctx: &mut Context, args: &[String]) -> i32 {
    let root = tree.root();
    let result = root.run(ctx, args);
    let err = result.err();

    if let Some(err) = err.as_ref().filter(|e| e.is_usage()) {
        let target = err
            .usage_target()
            .or(ctx.current)
            .and_then(|id| tree.get(id))
            .unwrap_or(root);
        tracing::debug!(command = ?target, "Showing usage");
        if let Err(e) = target.usage(ctx, Some(err)) {
            tracing::warn!(error = %e, "Failed to write usage");
        }
    }

    let code = root.exit(ctx, err.as_ref());
    tracing::debug!(code, "Command finished");
    code
}

/// Runs `tree` against the process arguments and environment, then exits.
pub fn main(tree: &CommandTree) -> ! {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut ctx = Context::default_context();
    let code = execute(tree, &mut ctx, &args);
    std::process::exit(code)
}
