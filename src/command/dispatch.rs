//! Parsing and dispatch through the tree.

use crate::args::{parse_args, ParseMode, Parsed};
use crate::command::CommandRef;
use crate::context::Context;
use crate::error::CliError;

impl<'a> CommandRef<'a> {
    /// Parses `args` against the options visible here.
    ///
    /// Uses the parse hook when one is set. Otherwise leaves parse
    /// exhaustively and branches stop at the first positional, which names
    /// the subcommand.
    pub fn parse(&self, ctx: &mut Context, args: &[String]) -> Parsed {
        if let Some(hook) = &self.node().hooks.parse {
            return hook(ctx, args);
        }
        let mode = if self.is_leaf() {
            ParseMode::Exhaustive
        } else {
            ParseMode::StopAtPositional
        };
        let mut parsed = parse_args(&self.all_opts(), args, mode);
        parsed.errors.set_at(self.id());
        parsed
    }

    /// Runs this command with `args`.
    ///
    /// A run hook takes over completely. Without one, a leaf fails with
    /// [`CliError::NoCommandProvided`] and a branch parses its own options
    /// then hands the remaining positionals to the child named by the first.
    pub fn run(&self, ctx: &mut Context, args: &[String]) -> Result<(), CliError> {
        ctx.current = Some(self.id());
        if let Some(hook) = &self.node().hooks.run {
            tracing::debug!(command = %self.name(), args = args.len(), "Running command");
            return hook(*self, ctx, args);
        }
        if self.is_leaf() {
            return Err(self.no_command());
        }
        let rest = self.parse(ctx, args).into_result()?;
        let Some((first, rest)) = rest.split_first() else {
            return Err(self.no_command());
        };
        let Some(sub) = self.find_sub(first) else {
            return Err(CliError::NoSuchCommand {
                command: self.name().to_string(),
                name: first.clone(),
                at: self.id(),
            });
        };
        tracing::debug!(from = %self.name(), to = %sub.name(), "Dispatching to subcommand");
        sub.run(ctx, rest)
    }

    /// Child whose name or one of whose aliases is exactly `name`.
    pub fn find_sub(&self, name: &str) -> Option<CommandRef<'a>> {
        self.children()
            .find(|c| c.name() == name || c.aliases().iter().any(|a| a == name))
    }

    fn no_command(&self) -> CliError {
        CliError::NoCommandProvided {
            command: self.name().to_string(),
            at: self.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use crate::command::Command;
    use crate::context::Context;
    use crate::error::CliError;
    use crate::opt::{Opt, OptType, Value};

    fn ctx() -> Context {
        Context::new(io::empty(), io::sink(), io::sink())
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    type Calls = Rc<RefCell<Vec<(String, Vec<String>)>>>;

    fn recording(name: &str, calls: &Calls) -> Command {
        let calls = Rc::clone(calls);
        let label = name.to_string();
        Command::new(name).with_run(move |_, _, args| {
            calls.borrow_mut().push((label.clone(), args.to_vec()));
            Ok(())
        })
    }

    #[test]
    fn test_routes_to_child_with_remaining_args() {
        let calls = Calls::default();
        let tree = Command::new("root")
            .with_subs([recording("a", &calls), recording("b", &calls)])
            .build();
        tree.root().run(&mut ctx(), &args(&["a", "x"])).unwrap();
        assert_eq!(*calls.borrow(), vec![("a".to_string(), args(&["x"]))]);
    }

    #[test]
    fn test_unknown_child_is_no_such_command() {
        let calls = Calls::default();
        let tree = Command::new("root")
            .with_subs([recording("a", &calls), recording("b", &calls)])
            .build();
        let err = tree.root().run(&mut ctx(), &args(&["c"])).unwrap_err();
        assert!(matches!(err, CliError::NoSuchCommand { ref name, .. } if name == "c"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_args_is_no_command_provided() {
        let calls = Calls::default();
        let tree = Command::new("root")
            .with_subs([recording("a", &calls), recording("b", &calls)])
            .build();
        let err = tree.root().run(&mut ctx(), &[]).unwrap_err();
        assert!(matches!(err, CliError::NoCommandProvided { at, .. } if at == tree.root().id()));
    }

    #[test]
    fn test_leaf_without_run_hook_fails() {
        let tree = Command::new("root").with_sub(Command::new("a")).build();
        let err = tree.root().run(&mut ctx(), &args(&["a"])).unwrap_err();
        assert!(matches!(err, CliError::NoCommandProvided { ref command, .. } if command == "a"));
    }

    #[test]
    fn test_branch_parses_own_options_before_routing() {
        let calls = Calls::default();
        let tree = Command::new("root")
            .with_opt(Opt::new("debug", OptType::Bool))
            .with_sub(recording("a", &calls))
            .build();
        tree.root()
            .run(&mut ctx(), &args(&["-debug", "a", "-debug", "x"]))
            .unwrap();
        assert_eq!(tree.root().opt("debug").unwrap().value(), Some(Value::Bool(true)));
        assert_eq!(*calls.borrow(), vec![("a".to_string(), args(&["-debug", "x"]))]);
    }

    #[test]
    fn test_branch_parse_error_stops_dispatch() {
        let calls = Calls::default();
        let tree = Command::new("root")
            .with_sub(recording("a", &calls))
            .build();
        let err = tree.root().run(&mut ctx(), &args(&["-zzz", "a"])).unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
        assert_eq!(err.usage_target(), Some(tree.root().id()));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_alias_routes_and_recursion_reaches_grandchild() {
        let calls = Calls::default();
        let tree = Command::new("root")
            .with_sub(
                Command::new("b")
                    .with_aliases(["bb", "bbb"])
                    .with_sub(recording("deep", &calls)),
            )
            .build();
        tree.root()
            .run(&mut ctx(), &args(&["bbb", "deep", "1", "2"]))
            .unwrap();
        assert_eq!(*calls.borrow(), vec![("deep".to_string(), args(&["1", "2"]))]);
    }

    #[test]
    fn test_leaf_hook_parses_itself() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in_hook = Rc::clone(&seen);
        let tree = Command::new("root")
            .with_opt(Opt::new("debug", OptType::Bool))
            .with_sub(
                Command::new("a")
                    .with_opt(Opt::new("level", OptType::Int))
                    .with_run(move |cmd, ctx, args| {
                        let rest = cmd.parse(ctx, args).into_result()?;
                        *seen_in_hook.borrow_mut() = rest;
                        let level = cmd
                            .opt("level")
                            .and_then(|o| o.value())
                            .and_then(|v| v.as_int())
                            .unwrap_or(0);
                        Err(CliError::ExitCode(level as i32))
                    }),
            )
            .build();
        let err = tree
            .root()
            .run(&mut ctx(), &args(&["a", "x", "-level", "3", "y", "-debug"]))
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(*seen.borrow(), args(&["x", "y"]));
        assert_eq!(tree.root().opt("debug").unwrap().value(), Some(Value::Bool(true)));
    }

    #[test]
    fn test_parse_hook_replaces_default_parsing() {
        let calls = Calls::default();
        let tree = Command::new("root")
            .with_parse(|_, args| {
                crate::args::Parsed::ok(args.iter().rev().cloned().collect())
            })
            .with_subs([recording("a", &calls), recording("b", &calls)])
            .build();
        tree.root().run(&mut ctx(), &args(&["x", "b"])).unwrap();
        assert_eq!(*calls.borrow(), vec![("b".to_string(), args(&["x"]))]);
    }
}
