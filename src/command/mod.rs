//! Command tree: builders, the arena they are flattened into, option
//! resolution and dispatch.
//!
//! ```text
//! Command (builder) → CommandTree (arena) → CommandRef::run
//!                                             ├─ all_opts   (resolve)
//!                                             ├─ parse      (args::parser)
//!                                             └─ find_sub → child.run
//! ```

mod dispatch;
mod resolve;
mod tree;

use std::collections::BTreeSet;

use crate::args::Parsed;
use crate::context::Context;
use crate::error::CliError;
use crate::opt::Opt;

pub use resolve::{all_opts, OptMap};
pub use tree::{CommandId, CommandRef, CommandTree};

/// Replaces the default option parsing of a command.
pub type ParseHook = dyn Fn(&mut Context, &[String]) -> Parsed;
/// Behaviour of a command. Leaf commands must provide one.
pub type RunHook = dyn Fn(CommandRef<'_>, &mut Context, &[String]) -> Result<(), CliError>;
/// Maps the outcome of a run to a process exit code.
pub type ExitHook = dyn Fn(&mut Context, Option<&CliError>) -> i32;
/// Renders help for a command, optionally explaining an error.
pub type UsageHook = dyn Fn(CommandRef<'_>, &mut Context, Option<&CliError>);

#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) parse: Option<Box<ParseHook>>,
    pub(crate) run: Option<Box<RunHook>>,
    pub(crate) exit: Option<Box<ExitHook>>,
    pub(crate) usage: Option<Box<UsageHook>>,
}

/// Builder for one command and, recursively, its subcommands.
///
/// Turn the finished root into a [`CommandTree`] with [`Command::build`].
pub struct Command {
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) synopsis: String,
    pub(crate) description: String,
    pub(crate) opts: Vec<Opt>,
    pub(crate) suppressed: BTreeSet<String>,
    pub(crate) children: Vec<Command>,
    pub(crate) hooks: Hooks,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            synopsis: String::new(),
            description: String::new(),
            opts: Vec::new(),
            suppressed: BTreeSet::new(),
            children: Vec::new(),
            hooks: Hooks::default(),
        }
    }

    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = synopsis.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Hides inherited options (and their aliases) at and below this command.
    pub fn with_suppressed_opts<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suppressed.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_opts(mut self, opts: impl IntoIterator<Item = Opt>) -> Self {
        self.opts.extend(opts);
        self
    }

    pub fn with_opt(mut self, opt: Opt) -> Self {
        self.opts.push(opt);
        self
    }

    pub fn with_subs(mut self, subs: impl IntoIterator<Item = Command>) -> Self {
        self.children.extend(subs);
        self
    }

    pub fn with_sub(mut self, sub: Command) -> Self {
        self.children.push(sub);
        self
    }

    pub fn with_parse(
        mut self,
        hook: impl Fn(&mut Context, &[String]) -> Parsed + 'static,
    ) -> Self {
        self.hooks.parse = Some(Box::new(hook));
        self
    }

    pub fn with_run(
        mut self,
        hook: impl Fn(CommandRef<'_>, &mut Context, &[String]) -> Result<(), CliError> + 'static,
    ) -> Self {
        self.hooks.run = Some(Box::new(hook));
        self
    }

    pub fn with_exit(
        mut self,
        hook: impl Fn(&mut Context, Option<&CliError>) -> i32 + 'static,
    ) -> Self {
        self.hooks.exit = Some(Box::new(hook));
        self
    }

    pub fn with_usage(
        mut self,
        hook: impl Fn(CommandRef<'_>, &mut Context, Option<&CliError>) + 'static,
    ) -> Self {
        self.hooks.usage = Some(Box::new(hook));
        self
    }

    /// Flattens this command and its subcommands into a tree rooted here.
    pub fn build(self) -> CommandTree {
        CommandTree::new(self)
    }
}
