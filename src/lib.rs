//! Command trees with scoped options, token parsing and tagged field binding.
//!
//! Build a tree of [`Command`]s, each declaring [`Opt`]s. When a command
//! runs, every option declared on it or on an ancestor is visible unless a
//! command on the way suppressed it; the closest declaration wins.
//!
//! ```no_run
//! use std::io::Write;
//!
//! use clitree::{Command, CliError, Opt, OptType};
//!
//! let tree = Command::new("tool")
//!     .with_opt(Opt::new("debug", OptType::Bool))
//!     .with_sub(Command::new("greet").with_run(|cmd, ctx, args| {
//!         let args = cmd.parse(ctx, args).into_result()?;
//!         writeln!(ctx.out, "hello {}", args.join(" "))?;
//!         Ok::<(), CliError>(())
//!     }))
//!     .build();
//! clitree::exit::main(&tree);
//! ```

pub mod args;
pub mod command;
pub mod context;
pub mod error;
pub mod exit;
pub mod logging;
pub mod opt;
pub mod tags;
pub mod usage;

pub use command::{all_opts, Command, CommandId, CommandRef, CommandTree, OptMap};
pub use context::{CancelHandle, Context, SharedBuffer};
pub use error::{CliError, ParseErrors, TagError};
pub use exit::execute;
pub use opt::{BindTarget, Binding, FuncType, Opt, OptType, TypeRegistry, Value, ValueKind};
pub use tags::{tagged_opts, tagged_opts_with_types, Field, Tagged};
